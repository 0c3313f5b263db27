//! Shared test fixtures: in-memory database, seeded employees and an
//! engine wired with a counting completion hook.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use exit_server::exit::{
    CompletionHook, ExitWorkflowEngine, NoticeWindowPolicy, SqlEmployeeDirectory,
    TenureNoticePolicy, WorkflowCtx,
};
use shared::models::Resignation;

/// Completion hook that counts its invocations
pub struct CountingHook {
    pub calls: AtomicUsize,
}

impl CountingHook {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionHook for CountingHook {
    async fn on_all_clearances_completed(&self, _case: &Resignation) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Fresh in-memory database with migrations applied and employees seeded:
/// - 42: standard tenure (joined 2020-03-01), manager 7, department 3
/// - 7:  the manager, no manager of their own
/// - 55: probation tenure (joined 2024-11-01), department 3
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");
    seed_employees(&pool).await;
    pool
}

/// Insert the fixture employees into an already-migrated database
pub async fn seed_employees(pool: &SqlitePool) {
    for (id, name, dept, manager, joined) in [
        (42i64, "Asha Pillai", 3i64, Some(7i64), "2020-03-01"),
        (7, "Dev Raman", 3, None, "2015-06-15"),
        (55, "Noel Thomas", 3, Some(7), "2024-11-01"),
    ] {
        sqlx::query(
            "INSERT INTO employee (id, full_name, department_id, reporting_manager_id, joined_on, is_active) \
             VALUES (?, ?, ?, ?, ?, 1)",
        )
        .bind(id)
        .bind(name)
        .bind(dept)
        .bind(manager)
        .bind(joined)
        .execute(pool)
        .await
        .expect("seed employee");
    }
}

/// Engine over the pool with default policies and the given hook
pub fn engine_with_hook(pool: SqlitePool, hook: Arc<CountingHook>) -> ExitWorkflowEngine {
    ExitWorkflowEngine::new(
        pool.clone(),
        Arc::new(SqlEmployeeDirectory::new(pool)),
        Arc::new(TenureNoticePolicy::default()),
        Arc::new(NoticeWindowPolicy),
        hook,
    )
}

/// Workflow context pinned to a fixed date for deterministic notice math
pub fn ctx_on(y: i32, m: u32, d: u32) -> WorkflowCtx {
    let now = Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap();
    WorkflowCtx::new("hr.admin", now)
}
