//! Clearance API Module
//!
//! Department sign-off registers for a resignation case. One upsert
//! path serves all four departments.

mod handler;

use axum::{
    routing::{get, put},
    Router,
};

use crate::core::ServerState;

/// Clearance router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/resignations/{id}/clearances", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{department}", put(handler::upsert))
}
