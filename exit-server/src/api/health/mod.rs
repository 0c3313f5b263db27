//! Health API Module

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

/// Health router — public, no identity required
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(handler::health))
}
