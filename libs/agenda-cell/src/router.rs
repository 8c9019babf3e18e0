// libs/agenda-cell/src/router.rs
use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn agenda_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/grid", get(handlers::get_agenda_grid))
        .with_state(state)
}
