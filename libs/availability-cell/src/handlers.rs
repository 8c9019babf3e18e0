use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AvailabilityError, CreateAvailabilityRequest, UpdateAvailabilityRequest};
use crate::services::AvailabilityService;

fn map_error(e: AvailabilityError) -> AppError {
    match e {
        AvailabilityError::NotFound => AppError::NotFound("Availability block not found".to_string()),
        AvailabilityError::InvalidRange => {
            AppError::ValidationError("Start time must be before end time".to_string())
        }
        AvailabilityError::Overlap { .. } => AppError::Conflict(e.to_string()),
        AvailabilityError::BackendConflict(msg) => AppError::Conflict(msg),
        AvailabilityError::Backend(msg) => AppError::ExternalService(msg),
    }
}

#[axum::debug_handler]
pub async fn list_availability(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(professional_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = AvailabilityService::new(&state);

    let blocks = service
        .get_professional_availability(professional_id, auth.token())
        .await
        .map_err(map_error)?;

    Ok(Json(json!({ "disponibilidades": blocks })))
}

#[axum::debug_handler]
pub async fn create_availability(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(professional_id): Path<i64>,
    Json(request): Json<CreateAvailabilityRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AvailabilityService::new(&state);

    let block = service
        .create_availability(professional_id, request, auth.token())
        .await
        .map_err(map_error)?;

    Ok(Json(json!({
        "success": true,
        "disponibilidad": block
    })))
}

#[axum::debug_handler]
pub async fn update_availability(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path((professional_id, block_id)): Path<(i64, i64)>,
    Json(request): Json<UpdateAvailabilityRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AvailabilityService::new(&state);

    let block = service
        .update_availability(professional_id, block_id, request, auth.token())
        .await
        .map_err(map_error)?;

    Ok(Json(json!({
        "success": true,
        "disponibilidad": block
    })))
}

#[axum::debug_handler]
pub async fn delete_availability(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path((_professional_id, block_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, AppError> {
    let service = AvailabilityService::new(&state);

    service
        .delete_availability(block_id, auth.token())
        .await
        .map_err(map_error)?;

    Ok(Json(json!({ "success": true })))
}
