use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use agenda_cell::router::agenda_routes;
use appointment_cell::router::appointment_routes;
use availability_cell::router::availability_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Citas Agenda API is running!" }))
        .nest("/api/citas", appointment_routes(state.clone()))
        .nest("/api/disponibilidades", availability_routes(state.clone()))
        .nest("/api/agenda", agenda_routes(state.clone()))
}
