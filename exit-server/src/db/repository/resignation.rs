//! Resignation Repository
//!
//! Query surface for resignation cases. Mutations go through the exit
//! engine so every transition is guarded and logged.

use super::RepoResult;
use crate::utils::time::{day_end_millis, day_start_millis};
use shared::models::{Resignation, ResignationFilter};
use sqlx::SqlitePool;

pub const COLUMNS: &str = "id, employee_id, department_id, reporting_manager_id, reason, \
    exit_discussion_held, last_working_day, status, early_release_date, \
    early_release_requested, early_release_approved, early_release_status, \
    rejection_reason, early_release_rejection_reason, is_active, \
    processed_by, processed_at, created_by, created_at, modified_by, modified_at";

/// Find a case by id
pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<Option<Resignation>> {
    let case = sqlx::query_as::<_, Resignation>(&format!(
        "SELECT {COLUMNS} FROM resignation WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(case)
}

/// Id of the employee's open case (pending or accepted), if any
pub async fn find_active_for_employee(pool: &SqlitePool, employee_id: i64) -> RepoResult<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM resignation WHERE employee_id = ? AND status IN ('pending', 'accepted') LIMIT 1",
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await?;
    Ok(id)
}

/// Filtered, paginated listing — newest first, ties broken by id
///
/// Returns the page of cases plus the total match count.
pub async fn list(
    pool: &SqlitePool,
    filter: &ResignationFilter,
) -> RepoResult<(Vec<Resignation>, u64)> {
    let from_millis = filter.from.map(day_start_millis);
    let to_millis = filter.to.map(day_end_millis);

    let where_clause = "WHERE (?1 IS NULL OR employee_id = ?1) \
        AND (?2 IS NULL OR department_id = ?2) \
        AND (?3 IS NULL OR status = ?3) \
        AND (?4 IS NULL OR created_at >= ?4) \
        AND (?5 IS NULL OR created_at < ?5)";

    let total = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM resignation {where_clause}"
    ))
    .bind(filter.employee_id)
    .bind(filter.department_id)
    .bind(filter.status)
    .bind(from_millis)
    .bind(to_millis)
    .fetch_one(pool)
    .await?;

    let page = filter.page.unwrap_or(1).max(1);
    let per_page = filter.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) as i64 * per_page as i64;

    let cases = sqlx::query_as::<_, Resignation>(&format!(
        "SELECT {COLUMNS} FROM resignation {where_clause} \
         ORDER BY created_at DESC, id DESC LIMIT ?6 OFFSET ?7"
    ))
    .bind(filter.employee_id)
    .bind(filter.department_id)
    .bind(filter.status)
    .bind(from_millis)
    .bind(to_millis)
    .bind(per_page as i64)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((cases, total as u64))
}
