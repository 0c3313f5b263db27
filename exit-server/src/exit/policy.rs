//! Workflow Collaborator Policies
//!
//! External contracts the engine consumes: employee identity lookup,
//! the notice-period computation and early-release eligibility. Each is
//! a trait so tests can substitute deterministic fakes.

use async_trait::async_trait;
use chrono::{Duration, Months, NaiveDate};
use sqlx::SqlitePool;

use crate::db::repository::{self, RepoResult};
use shared::models::EmployeeRef;

/// Read-only source of employee and reporting-manager identity
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Identity data for an active employee; `None` when unknown
    async fn lookup(&self, employee_id: i64) -> RepoResult<Option<EmployeeRef>>;

    /// Display name, for read aggregates
    async fn display_name(&self, employee_id: i64) -> RepoResult<Option<String>>;
}

/// Directory backed by the local employee table
pub struct SqlEmployeeDirectory {
    pool: SqlitePool,
}

impl SqlEmployeeDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeDirectory for SqlEmployeeDirectory {
    async fn lookup(&self, employee_id: i64) -> RepoResult<Option<EmployeeRef>> {
        let employee = repository::employee::get(&self.pool, employee_id).await?;
        Ok(employee.filter(|e| e.is_active).map(|e| EmployeeRef {
            department_id: e.department_id,
            reporting_manager_id: e.reporting_manager_id,
            joined_on: e.joined_on,
        }))
    }

    async fn display_name(&self, employee_id: i64) -> RepoResult<Option<String>> {
        repository::employee::display_name(&self.pool, employee_id).await
    }
}

/// Notice-period policy: computes the last working day at submission
pub trait NoticePolicy: Send + Sync {
    fn last_working_day(&self, tenure_start: NaiveDate, submitted_on: NaiveDate) -> NaiveDate;
}

/// Tenure-banded notice: a short window during probation, the standard
/// window afterwards
pub struct TenureNoticePolicy {
    pub probation_months: u32,
    pub probation_notice_days: u32,
    pub standard_notice_days: u32,
}

impl Default for TenureNoticePolicy {
    fn default() -> Self {
        Self {
            probation_months: 6,
            probation_notice_days: 15,
            standard_notice_days: 30,
        }
    }
}

impl NoticePolicy for TenureNoticePolicy {
    fn last_working_day(&self, tenure_start: NaiveDate, submitted_on: NaiveDate) -> NaiveDate {
        let probation_until = tenure_start
            .checked_add_months(Months::new(self.probation_months))
            .unwrap_or(tenure_start);
        let days = if submitted_on < probation_until {
            self.probation_notice_days
        } else {
            self.standard_notice_days
        };
        submitted_on + Duration::days(days as i64)
    }
}

/// Eligibility check for an early-release request
pub trait EarlyReleasePolicy: Send + Sync {
    /// `Err` carries the policy's user-facing message
    fn validate(
        &self,
        last_working_day: NaiveDate,
        proposed: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), String>;
}

/// Default eligibility: the proposed date must fall inside the current
/// notice window
pub struct NoticeWindowPolicy;

impl EarlyReleasePolicy for NoticeWindowPolicy {
    fn validate(
        &self,
        last_working_day: NaiveDate,
        proposed: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), String> {
        if proposed < today {
            return Err(format!("Early-release date {proposed} is in the past"));
        }
        if proposed >= last_working_day {
            return Err(format!(
                "Early-release date {proposed} must fall before the last working day {last_working_day}"
            ));
        }
        Ok(())
    }
}
