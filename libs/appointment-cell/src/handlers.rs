// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use chrono::NaiveDateTime;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AppointmentError, BookAppointmentRequest, UpdateStatusRequest};
use crate::services::booking::BookingService;
use crate::services::conflict::ConflictDetectionService;

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct ConflictCheckQuery {
    #[serde(rename = "profesional_id")]
    pub professional_id: i64,
    #[serde(rename = "fecha_hora")]
    pub start_time: NaiveDateTime,
    #[serde(rename = "duracion_minutos")]
    pub duration_minutes: i32,
}

#[derive(Debug, Deserialize)]
pub struct AppointmentRangeQuery {
    #[serde(rename = "desde")]
    pub from: NaiveDateTime,
    #[serde(rename = "hasta")]
    pub to: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    #[serde(rename = "horas")]
    pub hours_ahead: Option<i64>,
}

fn map_error(e: AppointmentError) -> AppError {
    match e {
        AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        AppointmentError::Validation(msg) => AppError::ValidationError(msg),
        AppointmentError::InvalidTime(msg) => AppError::BadRequest(msg),
        AppointmentError::Conflict { .. } => AppError::Conflict(e.to_string()),
        AppointmentError::BackendConflict(msg) => AppError::Conflict(msg),
        AppointmentError::InvalidStatusTransition { .. } => AppError::BadRequest(e.to_string()),
        AppointmentError::Backend(msg) => AppError::ExternalService(msg),
    }
}

// ==============================================================================
// HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(&state);

    let appointment = service
        .book_appointment(request, auth.token())
        .await
        .map_err(map_error)?;

    Ok(Json(json!({
        "success": true,
        "cita": appointment
    })))
}

#[axum::debug_handler]
pub async fn check_conflicts(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Query(query): Query<ConflictCheckQuery>,
) -> Result<Json<Value>, AppError> {
    let service = ConflictDetectionService::new(&state);

    let response = service
        .check_conflicts(
            query.professional_id,
            query.start_time,
            query.duration_minutes,
            auth.token(),
        )
        .await
        .map_err(map_error)?;

    Ok(Json(json!(response)))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(appointment_id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(&state);

    let appointment = service
        .update_status(appointment_id, request.new_status, auth.token())
        .await
        .map_err(map_error)?;

    Ok(Json(json!({
        "success": true,
        "cita": appointment
    })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(&state);

    let appointment = service
        .cancel_appointment(appointment_id, auth.token())
        .await
        .map_err(map_error)?;

    Ok(Json(json!({
        "success": true,
        "cita": appointment
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(&state);

    let appointment = service
        .get_appointment(appointment_id, auth.token())
        .await
        .map_err(map_error)?;

    Ok(Json(json!({ "cita": appointment })))
}

#[axum::debug_handler]
pub async fn get_professional_appointments(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(professional_id): Path<i64>,
    Query(query): Query<AppointmentRangeQuery>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(&state);

    let appointments = service
        .get_professional_appointments(professional_id, query.from, query.to, auth.token())
        .await
        .map_err(map_error)?;

    Ok(Json(json!({ "citas": appointments })))
}

#[axum::debug_handler]
pub async fn get_upcoming_appointments(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(professional_id): Path<i64>,
    Query(query): Query<UpcomingQuery>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(&state);

    let appointments = service
        .get_upcoming_appointments(
            professional_id,
            query.hours_ahead.unwrap_or(24 * 7),
            auth.token(),
        )
        .await
        .map_err(map_error)?;

    Ok(Json(json!({ "citas": appointments })))
}
