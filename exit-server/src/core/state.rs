//! Server State
//!
//! Holds shared references to the pool, the workflow engine and its
//! collaborators. Cloning is shallow (Arc all the way down).

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::exit::{
    CompletionHook, ExitWorkflowEngine, LogCompletionHook, NoticeWindowPolicy,
    SqlEmployeeDirectory, TenureNoticePolicy,
};

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Exit workflow engine — sole mutation authority over cases
    pub engine: Arc<ExitWorkflowEngine>,
}

impl ServerState {
    /// Initialize state: working directories, database, engine
    pub async fn initialize(config: &Config) -> Result<Self, crate::utils::AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| crate::utils::AppError::internal(format!("work dir: {e}")))?;

        let db_path = config.database_dir().join("exit.db");
        let db = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self::with_pool(config.clone(), db.pool))
    }

    /// Build state over an existing pool (used by tests with an
    /// in-memory database); wires the default collaborators
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        let hook: Arc<dyn CompletionHook> = Arc::new(LogCompletionHook);
        Self::with_collaborators(config, pool, hook)
    }

    /// Build state with a custom completion hook
    pub fn with_collaborators(
        config: Config,
        pool: SqlitePool,
        completion: Arc<dyn CompletionHook>,
    ) -> Self {
        let notice = TenureNoticePolicy {
            probation_months: config.probation_months,
            probation_notice_days: config.probation_notice_days,
            standard_notice_days: config.notice_days,
        };
        let engine = ExitWorkflowEngine::new(
            pool.clone(),
            Arc::new(SqlEmployeeDirectory::new(pool.clone())),
            Arc::new(notice),
            Arc::new(NoticeWindowPolicy),
            completion,
        );
        Self {
            config,
            pool,
            engine: Arc::new(engine),
        }
    }

    /// The workflow engine
    pub fn engine(&self) -> &ExitWorkflowEngine {
        &self.engine
    }
}
