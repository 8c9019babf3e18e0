// libs/agenda-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::TypedHeader;
use chrono::NaiveDate;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AgendaError, GridWindow};
use crate::services::agenda::AgendaService;

#[derive(Debug, Deserialize)]
pub struct AgendaGridQuery {
    #[serde(rename = "profesional_id")]
    pub professional_id: i64,
    /// "Ir a fecha" target, ISO `YYYY-MM-DD`. Defaults to today.
    pub anchor: Option<String>,
    pub window: Option<GridWindow>,
    #[serde(default)]
    pub only_free: bool,
}

/// Annotated week/month grid for one professional. A malformed anchor
/// answers 400 "Fecha inválida" without touching the backend, matching the
/// go-to-date guard in the agenda UI.
#[axum::debug_handler]
pub async fn get_agenda_grid(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Query(query): Query<AgendaGridQuery>,
) -> Result<Json<Value>, AppError> {
    let anchor = match query.anchor.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::BadRequest(AgendaError::InvalidDate.to_string()))?,
        None => chrono::Utc::now().date_naive(),
    };
    let window = query.window.unwrap_or(GridWindow::Week);

    let service = AgendaService::new(&state);

    let response = service
        .build_agenda(
            query.professional_id,
            anchor,
            window,
            query.only_free,
            auth.token(),
        )
        .await
        .map_err(|e| match e {
            AgendaError::InvalidDate => AppError::BadRequest(e.to_string()),
            AgendaError::Backend(msg) => AppError::ExternalService(msg),
        })?;

    Ok(Json(json!(response)))
}
