//! Exit Workflow Engine
//!
//! Single mutation authority over resignation cases. Every transition is
//! applied as a guarded UPDATE (compare-and-swap on the current status)
//! inside a transaction that also appends the history entry, so a
//! concurrent conflicting transition can never half-apply: the loser's
//! guard matches zero rows and the caller gets a domain error while the
//! records stay unchanged.
//!
//! The single-active-case invariant is backstopped by a partial unique
//! index on `resignation(employee_id)` for open statuses; a racing
//! submit resolves at the storage layer as a conflict.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use validator::Validate;

use crate::db::repository::{self, is_unique_violation};
use crate::exit::completion::CompletionHook;
use crate::exit::policy::{EarlyReleasePolicy, EmployeeDirectory, NoticePolicy};
use crate::utils::{AppError, AppResult};
use shared::models::{
    ActiveCaseCheck, Clearance, ClearanceDepartment, ClearanceUpsert, EarlyReleaseStatus,
    RejectRequest, RejectionType, Resignation, ResignationDetail, ResignationFilter,
    ResignationStatus, ResignationSubmit,
};
use shared::util::snowflake_id;
use shared::PaginatedResponse;

/// Per-call context: who is acting and when
///
/// Threaded explicitly into every workflow call instead of being read
/// from ambient state, so the engine is deterministic under test.
#[derive(Debug, Clone)]
pub struct WorkflowCtx {
    pub actor: String,
    pub now: DateTime<Utc>,
}

impl WorkflowCtx {
    pub fn new(actor: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            actor: actor.into(),
            now,
        }
    }

    pub fn now_millis(&self) -> i64 {
        self.now.timestamp_millis()
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

/// The workflow engine — validates and applies every state transition
pub struct ExitWorkflowEngine {
    pool: SqlitePool,
    directory: Arc<dyn EmployeeDirectory>,
    notice: Arc<dyn NoticePolicy>,
    early_release: Arc<dyn EarlyReleasePolicy>,
    completion: Arc<dyn CompletionHook>,
}

impl ExitWorkflowEngine {
    pub fn new(
        pool: SqlitePool,
        directory: Arc<dyn EmployeeDirectory>,
        notice: Arc<dyn NoticePolicy>,
        early_release: Arc<dyn EarlyReleasePolicy>,
        completion: Arc<dyn CompletionHook>,
    ) -> Self {
        Self {
            pool,
            directory,
            notice,
            early_release,
            completion,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ========== Submission ==========

    /// Submit a new resignation case for an employee
    pub async fn submit(
        &self,
        ctx: &WorkflowCtx,
        payload: ResignationSubmit,
    ) -> AppResult<Resignation> {
        payload.validate()?;

        let employee = self
            .directory
            .lookup(payload.employee_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Employee {} not found", payload.employee_id))
            })?;

        // Friendly pre-check; the partial unique index is the real guard
        if let Some(open_id) =
            repository::resignation::find_active_for_employee(&self.pool, payload.employee_id)
                .await?
        {
            return Err(AppError::conflict(format!(
                "Employee {} already has an active resignation (case {open_id})",
                payload.employee_id
            )));
        }

        let last_working_day = self
            .notice
            .last_working_day(employee.joined_on, ctx.today());
        let id = snowflake_id();

        let mut tx = self.begin().await?;
        let insert = sqlx::query(
            "INSERT INTO resignation (id, employee_id, department_id, reporting_manager_id, \
             reason, exit_discussion_held, last_working_day, status, is_active, created_by, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'pending', 1, ?8, ?9)",
        )
        .bind(id)
        .bind(payload.employee_id)
        .bind(payload.department_id)
        .bind(employee.reporting_manager_id)
        .bind(&payload.reason)
        .bind(payload.exit_discussion_held)
        .bind(last_working_day)
        .bind(&ctx.actor)
        .bind(ctx.now_millis())
        .execute(&mut *tx)
        .await;

        if let Err(e) = insert {
            if is_unique_violation(&e) {
                return Err(AppError::conflict(format!(
                    "Employee {} already has an active resignation",
                    payload.employee_id
                )));
            }
            return Err(AppError::database(e.to_string()));
        }

        let case = Self::fetch_case(&mut tx, id).await?;
        Self::append_history(&mut tx, &case, ctx).await?;
        self.commit(tx).await?;

        tracing::info!(
            target: "exit",
            case_id = id,
            employee_id = payload.employee_id,
            last_working_day = %last_working_day,
            "resignation submitted"
        );
        Ok(case)
    }

    // ========== Lifecycle transitions ==========

    /// Accept a pending resignation
    pub async fn accept(&self, ctx: &WorkflowCtx, case_id: i64) -> AppResult<Resignation> {
        let mut tx = self.begin().await?;
        let rows = sqlx::query(
            "UPDATE resignation SET status = 'accepted', processed_by = ?1, processed_at = ?2, \
             modified_by = ?1, modified_at = ?2 WHERE id = ?3 AND status = 'pending'",
        )
        .bind(&ctx.actor)
        .bind(ctx.now_millis())
        .bind(case_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .rows_affected();

        if rows == 0 {
            drop(tx);
            return Err(self.guard_failure(case_id, "accept").await);
        }

        let case = Self::fetch_case(&mut tx, case_id).await?;
        Self::append_history(&mut tx, &case, ctx).await?;
        self.commit(tx).await?;

        tracing::info!(target: "exit", case_id, "resignation accepted");
        Ok(case)
    }

    /// Reject either the resignation itself or its early-release request
    pub async fn reject(
        &self,
        ctx: &WorkflowCtx,
        case_id: i64,
        payload: RejectRequest,
    ) -> AppResult<Resignation> {
        payload.validate()?;
        match payload.rejection_type {
            RejectionType::Resignation => {
                self.reject_resignation(ctx, case_id, &payload.reason).await
            }
            RejectionType::EarlyRelease => {
                self.reject_early_release(ctx, case_id, &payload.reason)
                    .await
            }
        }
    }

    async fn reject_resignation(
        &self,
        ctx: &WorkflowCtx,
        case_id: i64,
        reason: &str,
    ) -> AppResult<Resignation> {
        let mut tx = self.begin().await?;
        let rows = sqlx::query(
            "UPDATE resignation SET status = 'rejected', rejection_reason = ?1, is_active = 0, \
             processed_by = ?2, processed_at = ?3, modified_by = ?2, modified_at = ?3 \
             WHERE id = ?4 AND status = 'pending'",
        )
        .bind(reason)
        .bind(&ctx.actor)
        .bind(ctx.now_millis())
        .bind(case_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .rows_affected();

        if rows == 0 {
            drop(tx);
            return Err(self.guard_failure(case_id, "reject").await);
        }

        let case = Self::fetch_case(&mut tx, case_id).await?;
        Self::append_history(&mut tx, &case, ctx).await?;
        self.commit(tx).await?;

        tracing::info!(target: "exit", case_id, "resignation rejected");
        Ok(case)
    }

    /// Revoke an open (pending or accepted) resignation
    pub async fn revoke(&self, ctx: &WorkflowCtx, case_id: i64) -> AppResult<Resignation> {
        let mut tx = self.begin().await?;
        let rows = sqlx::query(
            "UPDATE resignation SET status = 'revoked', is_active = 0, \
             modified_by = ?1, modified_at = ?2 \
             WHERE id = ?3 AND status IN ('pending', 'accepted')",
        )
        .bind(&ctx.actor)
        .bind(ctx.now_millis())
        .bind(case_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .rows_affected();

        if rows == 0 {
            drop(tx);
            return Err(self.guard_failure(case_id, "revoke").await);
        }

        let case = Self::fetch_case(&mut tx, case_id).await?;
        Self::append_history(&mut tx, &case, ctx).await?;
        self.commit(tx).await?;

        tracing::info!(target: "exit", case_id, "resignation revoked");
        Ok(case)
    }

    /// Settle an accepted case once every clearance register exists
    pub async fn complete(&self, ctx: &WorkflowCtx, case_id: i64) -> AppResult<Resignation> {
        let case = repository::resignation::get(&self.pool, case_id)
            .await?
            .ok_or_else(|| Self::case_not_found(case_id))?;
        if case.status != ResignationStatus::Accepted {
            return Err(AppError::invalid_transition(format!(
                "Cannot complete case {case_id} in status {}",
                case.status
            )));
        }
        if !repository::clearance::all_completed(&self.pool, case_id).await? {
            return Err(AppError::invalid_transition(format!(
                "Clearance sign-offs still pending for case {case_id}"
            )));
        }

        let mut tx = self.begin().await?;
        let rows = sqlx::query(
            "UPDATE resignation SET status = 'completed', \
             modified_by = ?1, modified_at = ?2 \
             WHERE id = ?3 AND status = 'accepted'",
        )
        .bind(&ctx.actor)
        .bind(ctx.now_millis())
        .bind(case_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .rows_affected();

        if rows == 0 {
            drop(tx);
            return Err(self.guard_failure(case_id, "complete").await);
        }

        let case = Self::fetch_case(&mut tx, case_id).await?;
        Self::append_history(&mut tx, &case, ctx).await?;
        self.commit(tx).await?;

        tracing::info!(target: "exit", case_id, "resignation completed");
        Ok(case)
    }

    // ========== Early release ==========

    /// Request early release within the current notice window
    pub async fn request_early_release(
        &self,
        ctx: &WorkflowCtx,
        case_id: i64,
        proposed: NaiveDate,
    ) -> AppResult<Resignation> {
        let case = repository::resignation::get(&self.pool, case_id)
            .await?
            .ok_or_else(|| Self::case_not_found(case_id))?;
        if case.status.is_terminal() {
            return Err(AppError::invalid_transition(format!(
                "Cannot request early release for case {case_id} in status {}",
                case.status
            )));
        }
        self.early_release
            .validate(case.last_working_day, proposed, ctx.today())
            .map_err(AppError::validation)?;

        let mut tx = self.begin().await?;
        let rows = sqlx::query(
            "UPDATE resignation SET early_release_date = ?1, early_release_requested = 1, \
             early_release_status = 'pending', modified_by = ?2, modified_at = ?3 \
             WHERE id = ?4 AND status IN ('pending', 'accepted') \
             AND (early_release_status IS NULL OR early_release_status != 'pending')",
        )
        .bind(proposed)
        .bind(&ctx.actor)
        .bind(ctx.now_millis())
        .bind(case_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .rows_affected();

        if rows == 0 {
            drop(tx);
            return Err(self.early_release_request_guard_failure(case_id).await);
        }

        let case = Self::fetch_case(&mut tx, case_id).await?;
        Self::append_history(&mut tx, &case, ctx).await?;
        self.commit(tx).await?;

        tracing::info!(target: "exit", case_id, proposed = %proposed, "early release requested");
        Ok(case)
    }

    /// Approve a pending early-release request
    ///
    /// The approved date overwrites the last working day — the only
    /// action that can move it earlier than its computed value.
    pub async fn approve_early_release(
        &self,
        ctx: &WorkflowCtx,
        case_id: i64,
        approved_date: NaiveDate,
    ) -> AppResult<Resignation> {
        let mut tx = self.begin().await?;
        let rows = sqlx::query(
            "UPDATE resignation SET early_release_status = 'approved', early_release_approved = 1, \
             early_release_date = ?1, last_working_day = ?1, modified_by = ?2, modified_at = ?3 \
             WHERE id = ?4 AND early_release_status = 'pending' \
             AND status IN ('pending', 'accepted')",
        )
        .bind(approved_date)
        .bind(&ctx.actor)
        .bind(ctx.now_millis())
        .bind(case_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .rows_affected();

        if rows == 0 {
            drop(tx);
            return Err(self.early_release_guard_failure(case_id).await);
        }

        let case = Self::fetch_case(&mut tx, case_id).await?;
        Self::append_history(&mut tx, &case, ctx).await?;
        self.commit(tx).await?;

        tracing::info!(
            target: "exit",
            case_id,
            last_working_day = %approved_date,
            "early release approved"
        );
        Ok(case)
    }

    async fn reject_early_release(
        &self,
        ctx: &WorkflowCtx,
        case_id: i64,
        reason: &str,
    ) -> AppResult<Resignation> {
        let mut tx = self.begin().await?;
        let rows = sqlx::query(
            "UPDATE resignation SET early_release_status = 'rejected', early_release_approved = 0, \
             early_release_rejection_reason = ?1, modified_by = ?2, modified_at = ?3 \
             WHERE id = ?4 AND early_release_status = 'pending' \
             AND status IN ('pending', 'accepted')",
        )
        .bind(reason)
        .bind(&ctx.actor)
        .bind(ctx.now_millis())
        .bind(case_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .rows_affected();

        if rows == 0 {
            drop(tx);
            return Err(self.early_release_guard_failure(case_id).await);
        }

        let case = Self::fetch_case(&mut tx, case_id).await?;
        Self::append_history(&mut tx, &case, ctx).await?;
        self.commit(tx).await?;

        tracing::info!(target: "exit", case_id, "early release rejected");
        Ok(case)
    }

    // ========== Administrative correction ==========

    /// Override the last working day; no status precondition
    pub async fn update_last_working_day(
        &self,
        ctx: &WorkflowCtx,
        case_id: i64,
        new_date: NaiveDate,
    ) -> AppResult<Resignation> {
        let rows = sqlx::query(
            "UPDATE resignation SET last_working_day = ?1, modified_by = ?2, modified_at = ?3 \
             WHERE id = ?4",
        )
        .bind(new_date)
        .bind(&ctx.actor)
        .bind(ctx.now_millis())
        .bind(case_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .rows_affected();

        if rows == 0 {
            return Err(Self::case_not_found(case_id));
        }

        tracing::info!(target: "exit", case_id, last_working_day = %new_date, "last working day updated");
        repository::resignation::get(&self.pool, case_id)
            .await?
            .ok_or_else(|| Self::case_not_found(case_id))
    }

    // ========== Clearance registers ==========

    /// Create or replace a department's clearance register for a case
    ///
    /// The case row is touched first, so concurrent upserts for the same
    /// case serialize behind its write lock and the completeness
    /// false→true flip is observed by exactly one of them. The hook
    /// fires after commit.
    pub async fn upsert_clearance(
        &self,
        ctx: &WorkflowCtx,
        case_id: i64,
        department: ClearanceDepartment,
        payload: ClearanceUpsert,
    ) -> AppResult<Clearance> {
        if payload.details.department() != department {
            return Err(AppError::validation(format!(
                "Clearance details are for department '{}', expected '{department}'",
                payload.details.department()
            )));
        }

        let details_json = serde_json::to_string(&payload.details)
            .map_err(|e| AppError::internal(format!("Failed to encode clearance details: {e}")))?;

        let mut tx = self.begin().await?;

        // Existence check + write lock on the case row in one statement
        let rows = sqlx::query(
            "UPDATE resignation SET modified_by = ?1, modified_at = ?2 WHERE id = ?3",
        )
        .bind(&ctx.actor)
        .bind(ctx.now_millis())
        .bind(case_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .rows_affected();
        if rows == 0 {
            drop(tx);
            return Err(Self::case_not_found(case_id));
        }

        let was_complete = Self::all_registers_present(&mut tx, case_id).await?;

        sqlx::query(
            "INSERT INTO clearance (resignation_id, department, details, note, attachment, created_by, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
             ON CONFLICT(resignation_id, department) DO UPDATE SET \
             details = excluded.details, note = excluded.note, attachment = excluded.attachment, \
             modified_by = ?6, modified_at = ?7",
        )
        .bind(case_id)
        .bind(department)
        .bind(&details_json)
        .bind(&payload.note)
        .bind(&payload.attachment)
        .bind(&ctx.actor)
        .bind(ctx.now_millis())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

        let register = sqlx::query_as::<_, Clearance>(&format!(
            "SELECT {} FROM clearance WHERE resignation_id = ? AND department = ?",
            repository::clearance::COLUMNS
        ))
        .bind(case_id)
        .bind(department)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

        let now_complete = Self::all_registers_present(&mut tx, case_id).await?;
        let completed_case = if !was_complete && now_complete {
            Some(Self::fetch_case(&mut tx, case_id).await?)
        } else {
            None
        };

        self.commit(tx).await?;

        if let Some(case) = completed_case {
            self.completion.on_all_clearances_completed(&case).await;
        }

        tracing::info!(target: "exit", case_id, department = %department, "clearance upserted");
        Ok(register)
    }

    // ========== Query surface ==========

    /// Full aggregate for a case
    pub async fn get_detail(&self, case_id: i64) -> AppResult<ResignationDetail> {
        let case = repository::resignation::get(&self.pool, case_id)
            .await?
            .ok_or_else(|| Self::case_not_found(case_id))?;

        // Name lookup failure is not fatal to the read
        let employee_name = self
            .directory
            .display_name(case.employee_id)
            .await
            .ok()
            .flatten();

        let clearances = repository::clearance::list_for(&self.pool, case_id).await?;
        let history = repository::history::list_for(&self.pool, case_id).await?;
        let all_clearances_completed =
            repository::clearance::all_completed(&self.pool, case_id).await?;

        Ok(ResignationDetail {
            case,
            employee_name,
            clearances,
            history,
            all_clearances_completed,
        })
    }

    /// Filtered, paginated case listing
    pub async fn list(
        &self,
        filter: ResignationFilter,
    ) -> AppResult<PaginatedResponse<Resignation>> {
        let page = filter.page.unwrap_or(1).max(1);
        let per_page = filter.per_page.unwrap_or(20).clamp(1, 100);
        let filter = ResignationFilter {
            page: Some(page),
            per_page: Some(per_page),
            ..filter
        };

        let (items, total) = repository::resignation::list(&self.pool, &filter).await?;
        Ok(PaginatedResponse::new(items, page, per_page, total))
    }

    /// Whether an employee has an open case (used by the submission
    /// precondition and by client UI)
    pub async fn exists_active(&self, employee_id: i64) -> AppResult<ActiveCaseCheck> {
        let case_id =
            repository::resignation::find_active_for_employee(&self.pool, employee_id).await?;
        Ok(ActiveCaseCheck {
            exists: case_id.is_some(),
            case_id,
        })
    }

    // ========== Internals ==========

    async fn begin(&self) -> AppResult<Transaction<'static, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::database(e.to_string()))
    }

    async fn commit(&self, tx: Transaction<'static, Sqlite>) -> AppResult<()> {
        tx.commit()
            .await
            .map_err(|e| AppError::database(e.to_string()))
    }

    async fn fetch_case(
        tx: &mut Transaction<'static, Sqlite>,
        case_id: i64,
    ) -> AppResult<Resignation> {
        sqlx::query_as::<_, Resignation>(&format!(
            "SELECT {} FROM resignation WHERE id = ?",
            repository::resignation::COLUMNS
        ))
        .bind(case_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| Self::case_not_found(case_id))
    }

    /// Completeness presence query, evaluated inside the upsert's
    /// transaction so the flip is detected exactly once
    async fn all_registers_present(
        tx: &mut Transaction<'static, Sqlite>,
        case_id: i64,
    ) -> AppResult<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT department) FROM clearance WHERE resignation_id = ?",
        )
        .bind(case_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
        Ok(count as usize == ClearanceDepartment::ALL.len())
    }

    /// One history entry per successful transition, in the same
    /// transaction as the transition itself
    async fn append_history(
        tx: &mut Transaction<'static, Sqlite>,
        case: &Resignation,
        ctx: &WorkflowCtx,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO resignation_history (resignation_id, status, early_release_status, created_by, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(case.id)
        .bind(case.status)
        .bind(case.early_release_status)
        .bind(&ctx.actor)
        .bind(ctx.now_millis())
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
        Ok(())
    }

    fn case_not_found(case_id: i64) -> AppError {
        AppError::not_found(format!("Resignation case {case_id} not found"))
    }

    /// Classify a zero-row guarded update: missing case vs wrong status
    async fn guard_failure(&self, case_id: i64, action: &str) -> AppError {
        match repository::resignation::get(&self.pool, case_id).await {
            Ok(Some(case)) => AppError::invalid_transition(format!(
                "Cannot {action} case {case_id} in status {}",
                case.status
            )),
            Ok(None) => Self::case_not_found(case_id),
            Err(e) => e.into(),
        }
    }

    /// Classify a zero-row early-release decision: missing case,
    /// terminal case, or no pending request
    async fn early_release_guard_failure(&self, case_id: i64) -> AppError {
        match repository::resignation::get(&self.pool, case_id).await {
            Ok(Some(case)) if case.status.is_terminal() => AppError::invalid_transition(format!(
                "Cannot decide early release for case {case_id} in status {}",
                case.status
            )),
            Ok(Some(_)) => AppError::invalid_transition(format!(
                "No pending early-release request for case {case_id}"
            )),
            Ok(None) => Self::case_not_found(case_id),
            Err(e) => e.into(),
        }
    }

    /// Classify a zero-row early-release request: outstanding request,
    /// case gone terminal since the read, or missing case
    async fn early_release_request_guard_failure(&self, case_id: i64) -> AppError {
        match repository::resignation::get(&self.pool, case_id).await {
            Ok(Some(case)) if case.early_release_status == Some(EarlyReleaseStatus::Pending) => {
                AppError::conflict(format!(
                    "An early-release request is already pending for case {case_id}"
                ))
            }
            Ok(Some(case)) => AppError::invalid_transition(format!(
                "Cannot request early release for case {case_id} in status {}",
                case.status
            )),
            Ok(None) => Self::case_not_found(case_id),
            Err(e) => e.into(),
        }
    }
}
