// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/conflictos", get(handlers::check_conflicts))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route("/{appointment_id}/estado", put(handlers::update_status))
        .route("/{appointment_id}/cancelar", post(handlers::cancel_appointment))
        .route(
            "/profesional/{professional_id}",
            get(handlers::get_professional_appointments),
        )
        .route(
            "/profesional/{professional_id}/proximas",
            get(handlers::get_upcoming_appointments),
        )
        .with_state(state)
}
