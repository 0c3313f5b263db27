//! Resignation API Module
//!
//! Workflow and query endpoints for resignation cases. All mutations go
//! through the exit engine; handlers stay thin.

mod handler;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::core::ServerState;

/// Resignation router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/resignations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::submit).get(handler::list))
        .route("/active/{employee_id}", get(handler::active))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/accept", post(handler::accept))
        .route("/{id}/reject", post(handler::reject))
        .route("/{id}/revoke", post(handler::revoke))
        .route("/{id}/complete", post(handler::complete))
        .route("/{id}/early-release", post(handler::request_early_release))
        .route(
            "/{id}/early-release/approve",
            post(handler::approve_early_release),
        )
        .route(
            "/{id}/early-release/reject",
            post(handler::reject_early_release),
        )
        .route(
            "/{id}/last-working-day",
            put(handler::update_last_working_day),
        )
}
