//! Identity Middleware
//!
//! Extracts the gateway-asserted actor identity and injects
//! [`CurrentActor`] into request extensions
//! (`req.extensions_mut().insert(actor)`).
//!
//! # Paths that skip the identity check
//!
//! - `OPTIONS *` (CORS preflight)
//! - non-`/api/` paths
//! - `/api/health` (liveness probe)

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::warn;

use crate::utils::AppError;

/// Header carrying the authenticated identity, set by the gateway
pub const ACTOR_HEADER: &str = "x-actor-id";

/// Authenticated actor for the current request
#[derive(Debug, Clone)]
pub struct CurrentActor(pub String);

impl CurrentActor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identity middleware — requires a gateway-asserted actor on API routes
pub async fn require_identity(mut req: Request, next: Next) -> Result<Response, AppError> {
    let path = req.uri().path();

    // Allow CORS preflight OPTIONS requests
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes pass through (they 404 normally)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // Public API routes
    if path == "/api/health" {
        return Ok(next.run(req).await);
    }

    let actor = req
        .headers()
        .get(ACTOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match actor {
        Some(actor) => {
            let actor = CurrentActor(actor.to_string());
            req.extensions_mut().insert(actor);
            Ok(next.run(req).await)
        }
        None => {
            warn!(target: "security", uri = %req.uri(), "request without actor identity");
            Err(AppError::unauthorized())
        }
    }
}
