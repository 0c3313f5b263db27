//! Employee Lookup Models
//!
//! Read-only identity data consumed by the exit workflow. The employee
//! master records are owned by the wider HRMS; this service only reads
//! them to populate a new resignation case.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Employee entity (lookup only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    pub department_id: i64,
    pub reporting_manager_id: Option<i64>,
    /// Tenure start, used by the notice-period policy
    pub joined_on: NaiveDate,
    pub is_active: bool,
}

/// Slim employee reference returned by the directory collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRef {
    pub department_id: i64,
    pub reporting_manager_id: Option<i64>,
    pub joined_on: NaiveDate,
}
