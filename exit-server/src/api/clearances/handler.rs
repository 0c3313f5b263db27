//! Clearance API Handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;

use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::db::repository;
use crate::exit::WorkflowCtx;
use crate::utils::AppResult;
use shared::models::{Clearance, ClearanceDepartment, ClearanceUpsert};
use shared::ApiResponse;

/// All registers currently present for a case
pub async fn list(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Vec<Clearance>>>> {
    let rows = repository::clearance::list_for(&state.pool, id).await?;
    Ok(Json(ApiResponse::ok(rows)))
}

/// PUT /api/resignations/{id}/clearances/{department} — create or
/// replace the department's register, then re-evaluate completeness
pub async fn upsert(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Path((id, department)): Path<(i64, ClearanceDepartment)>,
    Json(payload): Json<ClearanceUpsert>,
) -> AppResult<Json<ApiResponse<Clearance>>> {
    let ctx = WorkflowCtx::new(actor.as_str(), Utc::now());
    let register = state
        .engine()
        .upsert_clearance(&ctx, id, department, payload)
        .await?;
    Ok(Json(ApiResponse::ok_with_message(
        register,
        "Clearance recorded",
    )))
}
