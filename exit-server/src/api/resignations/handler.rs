//! Resignation API Handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;

use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::exit::WorkflowCtx;
use crate::utils::AppResult;
use shared::models::{
    ActiveCaseCheck, EarlyReleaseApprove, EarlyReleaseReject, EarlyReleaseRequest,
    LastWorkingDayUpdate, RejectRequest, RejectionType, Resignation, ResignationDetail,
    ResignationFilter, ResignationSubmit,
};
use shared::{ApiResponse, PaginatedResponse};

fn ctx(actor: &CurrentActor) -> WorkflowCtx {
    WorkflowCtx::new(actor.as_str(), Utc::now())
}

/// Submit a new resignation
pub async fn submit(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Json(payload): Json<ResignationSubmit>,
) -> AppResult<Json<ApiResponse<Resignation>>> {
    let case = state.engine().submit(&ctx(&actor), payload).await?;
    Ok(Json(ApiResponse::ok_with_message(
        case,
        "Resignation submitted",
    )))
}

/// List resignations with conjunctive filters, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<ResignationFilter>,
) -> AppResult<Json<ApiResponse<PaginatedResponse<Resignation>>>> {
    let page = state.engine().list(filter).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// Full aggregate for one case
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<ResignationDetail>>> {
    let detail = state.engine().get_detail(id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// Whether the employee has an open case
pub async fn active(
    State(state): State<ServerState>,
    Path(employee_id): Path<i64>,
) -> AppResult<Json<ApiResponse<ActiveCaseCheck>>> {
    let check = state.engine().exists_active(employee_id).await?;
    Ok(Json(ApiResponse::ok(check)))
}

/// Accept a pending resignation
pub async fn accept(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Resignation>>> {
    let case = state.engine().accept(&ctx(&actor), id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        case,
        "Resignation accepted",
    )))
}

/// Reject the resignation or its early-release request
pub async fn reject(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Path(id): Path<i64>,
    Json(payload): Json<RejectRequest>,
) -> AppResult<Json<ApiResponse<Resignation>>> {
    let case = state.engine().reject(&ctx(&actor), id, payload).await?;
    Ok(Json(ApiResponse::ok(case)))
}

/// Revoke an open resignation
pub async fn revoke(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Resignation>>> {
    let case = state.engine().revoke(&ctx(&actor), id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        case,
        "Resignation revoked",
    )))
}

/// Settle an accepted case (all clearances must exist)
pub async fn complete(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Resignation>>> {
    let case = state.engine().complete(&ctx(&actor), id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        case,
        "Resignation completed",
    )))
}

/// Request early release
pub async fn request_early_release(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Path(id): Path<i64>,
    Json(payload): Json<EarlyReleaseRequest>,
) -> AppResult<Json<ApiResponse<Resignation>>> {
    let case = state
        .engine()
        .request_early_release(&ctx(&actor), id, payload.early_release_date)
        .await?;
    Ok(Json(ApiResponse::ok_with_message(
        case,
        "Early release requested",
    )))
}

/// Approve a pending early-release request
pub async fn approve_early_release(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Path(id): Path<i64>,
    Json(payload): Json<EarlyReleaseApprove>,
) -> AppResult<Json<ApiResponse<Resignation>>> {
    let case = state
        .engine()
        .approve_early_release(&ctx(&actor), id, payload.approved_date)
        .await?;
    Ok(Json(ApiResponse::ok_with_message(
        case,
        "Early release approved",
    )))
}

/// Reject a pending early-release request
pub async fn reject_early_release(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Path(id): Path<i64>,
    Json(payload): Json<EarlyReleaseReject>,
) -> AppResult<Json<ApiResponse<Resignation>>> {
    let reject = RejectRequest {
        rejection_type: RejectionType::EarlyRelease,
        reason: payload.reason,
    };
    let case = state.engine().reject(&ctx(&actor), id, reject).await?;
    Ok(Json(ApiResponse::ok_with_message(
        case,
        "Early release rejected",
    )))
}

/// Administrative last-working-day override
pub async fn update_last_working_day(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Path(id): Path<i64>,
    Json(payload): Json<LastWorkingDayUpdate>,
) -> AppResult<Json<ApiResponse<Resignation>>> {
    let case = state
        .engine()
        .update_last_working_day(&ctx(&actor), id, payload.last_working_day)
        .await?;
    Ok(Json(ApiResponse::ok_with_message(
        case,
        "Last working day updated",
    )))
}
