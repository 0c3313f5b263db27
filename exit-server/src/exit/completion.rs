//! Auto-Completion Hook
//!
//! Fired by the engine when the derived `all_clearances_completed` fact
//! flips false→true for a case. Settlement itself stays an explicit
//! administrative action; the hook is a fire-and-forget side effect
//! (notification dispatch, reporting) owned by the caller.

use async_trait::async_trait;
use shared::models::Resignation;

#[async_trait]
pub trait CompletionHook: Send + Sync {
    async fn on_all_clearances_completed(&self, case: &Resignation);
}

/// Default hook: structured log entry only
pub struct LogCompletionHook;

#[async_trait]
impl CompletionHook for LogCompletionHook {
    async fn on_all_clearances_completed(&self, case: &Resignation) {
        tracing::info!(
            target: "exit",
            case_id = case.id,
            employee_id = case.employee_id,
            status = %case.status,
            "all clearance registers completed"
        );
    }
}
