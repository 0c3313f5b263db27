//! Server Configuration
//!
//! All settings can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | /var/lib/hrms/exit | working directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development / staging / production |
//! | NOTICE_DAYS | 30 | standard notice period in days |
//! | PROBATION_NOTICE_DAYS | 15 | notice period during probation |
//! | PROBATION_MONTHS | 6 | probation length in months |

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Standard notice period (days)
    pub notice_days: u32,
    /// Notice period during probation (days)
    pub probation_notice_days: u32,
    /// Probation length (months)
    pub probation_months: u32,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/hrms/exit".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            notice_days: std::env::var("NOTICE_DAYS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
            probation_notice_days: std::env::var("PROBATION_NOTICE_DAYS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(15),
            probation_months: std::env::var("PROBATION_MONTHS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(6),
        }
    }

    /// Directory holding the SQLite database file
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Directory holding rolling log files
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Ensure the working directory structure exists
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: "/var/lib/hrms/exit".into(),
            http_port: 3000,
            environment: "development".into(),
            notice_days: 30,
            probation_notice_days: 15,
            probation_months: 6,
        }
    }
}
