//! Anganwadi centre handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::{
    AppState,
    error::ApiResult,
    extract::JsonBody,
    types::{AssignWorkerRequest, CreateCenterRequest},
};
use crate::core::center;
use crate::entities::CenterModel;

/// `GET /api/centers`
pub async fn list_centers(State(state): State<AppState>) -> ApiResult<Json<Vec<CenterModel>>> {
    let centers = center::list_centers(&state.database).await?;
    Ok(Json(centers))
}

/// `POST /api/centers`
pub async fn create_center(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateCenterRequest>,
) -> ApiResult<(StatusCode, Json<CenterModel>)> {
    let created = center::create_center(
        &state.database,
        request.name,
        request.code,
        request.district,
        request.worker_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/centers/:id`
pub async fn get_center(
    State(state): State<AppState>,
    Path(center_id): Path<i64>,
) -> ApiResult<Json<CenterModel>> {
    let center = center::get_center(&state.database, center_id).await?;
    Ok(Json(center))
}

/// `PUT /api/centers/:id/worker`
pub async fn assign_worker(
    State(state): State<AppState>,
    Path(center_id): Path<i64>,
    JsonBody(request): JsonBody<AssignWorkerRequest>,
) -> ApiResult<Json<CenterModel>> {
    let center = center::assign_worker(&state.database, center_id, request.worker_id).await?;
    Ok(Json(center))
}
