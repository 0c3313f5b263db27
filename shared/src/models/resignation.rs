//! Resignation Case Models
//!
//! The resignation case is the aggregate root of exit management: it owns
//! the lifecycle status, the early-release sub-status and the history log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Clearance;

/// Resignation lifecycle status
///
/// `Pending → Accepted → Completed`, with `Pending → Rejected` and
/// `{Pending, Accepted} → Revoked` as alternate terminal edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ResignationStatus {
    Pending,
    Accepted,
    Rejected,
    Revoked,
    Completed,
}

impl ResignationStatus {
    /// Terminal states admit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Revoked | Self::Completed)
    }
}

impl std::fmt::Display for ResignationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Revoked => "revoked",
            Self::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

/// Early-release sub-status, independent of the primary lifecycle axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum EarlyReleaseStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for EarlyReleaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        };
        write!(f, "{s}")
    }
}

/// Discriminator for the reject operation: the resignation itself or
/// only its early-release request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionType {
    Resignation,
    EarlyRelease,
}

/// Resignation case entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Resignation {
    pub id: i64,
    pub employee_id: i64,
    pub department_id: i64,
    pub reporting_manager_id: Option<i64>,
    pub reason: String,
    pub exit_discussion_held: bool,
    /// Computed at submission by the notice-period policy; only the
    /// early-release approval and the explicit admin override move it.
    pub last_working_day: NaiveDate,
    pub status: ResignationStatus,
    pub early_release_date: Option<NaiveDate>,
    pub early_release_requested: bool,
    pub early_release_approved: bool,
    pub early_release_status: Option<EarlyReleaseStatus>,
    pub rejection_reason: Option<String>,
    pub early_release_rejection_reason: Option<String>,
    pub is_active: bool,
    pub processed_by: Option<String>,
    pub processed_at: Option<i64>,
    pub created_by: String,
    pub created_at: i64,
    pub modified_by: Option<String>,
    pub modified_at: Option<i64>,
}

/// History log entry — one per successful transition, append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ResignationHistoryEntry {
    pub id: i64,
    pub resignation_id: i64,
    pub status: ResignationStatus,
    pub early_release_status: Option<EarlyReleaseStatus>,
    pub created_by: String,
    pub created_at: i64,
}

/// Submit resignation payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResignationSubmit {
    pub employee_id: i64,
    pub department_id: i64,
    #[validate(length(min = 1, max = 500, message = "reason must be 1-500 characters"))]
    pub reason: String,
    #[serde(default)]
    pub exit_discussion_held: bool,
}

/// Reject payload, parameterized by rejection target
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RejectRequest {
    pub rejection_type: RejectionType,
    #[validate(length(min = 1, max = 1000, message = "reason must be 1-1000 characters"))]
    pub reason: String,
}

/// Request early release payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarlyReleaseRequest {
    pub early_release_date: NaiveDate,
}

/// Approve early release payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarlyReleaseApprove {
    pub approved_date: NaiveDate,
}

/// Reject early release payload (shorthand for `RejectRequest` with
/// `rejection_type = early_release`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EarlyReleaseReject {
    #[validate(length(min = 1, max = 1000, message = "reason must be 1-1000 characters"))]
    pub reason: String,
}

/// Administrative last-working-day override payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastWorkingDayUpdate {
    pub last_working_day: NaiveDate,
}

/// Conjunctive list filters; all absent filters match everything
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResignationFilter {
    pub employee_id: Option<i64>,
    pub department_id: Option<i64>,
    pub status: Option<ResignationStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Full read aggregate: case + joined identity, clearances, history and
/// the derived completion flag
#[derive(Debug, Clone, Serialize)]
pub struct ResignationDetail {
    #[serde(flatten)]
    pub case: Resignation,
    pub employee_name: Option<String>,
    pub clearances: Vec<Clearance>,
    pub history: Vec<ResignationHistoryEntry>,
    /// True iff all four department registers exist (presence query,
    /// never a cached flag)
    pub all_clearances_completed: bool,
}

/// Active-case probe result for an employee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveCaseCheck {
    pub exists: bool,
    pub case_id: Option<i64>,
}
