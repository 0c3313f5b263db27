//! Clearance Register Repository
//!
//! Completeness is a presence query across the four registers, never a
//! cached flag — a second source of truth could drift from the rows.

use super::RepoResult;
use shared::models::{Clearance, ClearanceDepartment};
use sqlx::SqlitePool;

pub const COLUMNS: &str = "id, resignation_id, department, details, note, attachment, \
    created_by, created_at, modified_by, modified_at";

/// All registers present for a case
pub async fn list_for(pool: &SqlitePool, resignation_id: i64) -> RepoResult<Vec<Clearance>> {
    let rows = sqlx::query_as::<_, Clearance>(&format!(
        "SELECT {COLUMNS} FROM clearance WHERE resignation_id = ? ORDER BY department"
    ))
    .bind(resignation_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// A single department's register for a case, if present
pub async fn get(
    pool: &SqlitePool,
    resignation_id: i64,
    department: ClearanceDepartment,
) -> RepoResult<Option<Clearance>> {
    let row = sqlx::query_as::<_, Clearance>(&format!(
        "SELECT {COLUMNS} FROM clearance WHERE resignation_id = ? AND department = ?"
    ))
    .bind(resignation_id)
    .bind(department)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// True iff every department register exists for the case
pub async fn all_completed(pool: &SqlitePool, resignation_id: i64) -> RepoResult<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT department) FROM clearance WHERE resignation_id = ?",
    )
    .bind(resignation_id)
    .fetch_one(pool)
    .await?;
    Ok(count as usize == ClearanceDepartment::ALL.len())
}
