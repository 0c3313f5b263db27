//! Employee Lookup Repository

use super::RepoResult;
use shared::models::Employee;
use sqlx::SqlitePool;

/// Find an employee by id
pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(
        "SELECT id, full_name, department_id, reporting_manager_id, joined_on, is_active FROM employee WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(employee)
}

/// Display name of an employee, if known
pub async fn display_name(pool: &SqlitePool, id: i64) -> RepoResult<Option<String>> {
    let name = sqlx::query_scalar::<_, String>("SELECT full_name FROM employee WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(name)
}
