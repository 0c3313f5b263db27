//! Resignation History Repository
//!
//! The history log is append-only: entries are written by the workflow
//! engine inside each transition's transaction and only read here.

use super::RepoResult;
use shared::models::ResignationHistoryEntry;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, resignation_id, status, early_release_status, created_by, created_at";

/// All history entries for a case, oldest first
pub async fn list_for(pool: &SqlitePool, resignation_id: i64) -> RepoResult<Vec<ResignationHistoryEntry>> {
    let entries = sqlx::query_as::<_, ResignationHistoryEntry>(&format!(
        "SELECT {COLUMNS} FROM resignation_history WHERE resignation_id = ? ORDER BY id"
    ))
    .bind(resignation_id)
    .fetch_all(pool)
    .await?;
    Ok(entries)
}

/// Number of history entries for a case
pub async fn count_for(pool: &SqlitePool, resignation_id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM resignation_history WHERE resignation_id = ?",
    )
    .bind(resignation_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}
