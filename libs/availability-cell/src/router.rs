use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn availability_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/{professional_id}",
            get(handlers::list_availability).post(handlers::create_availability),
        )
        .route(
            "/{professional_id}/{block_id}",
            put(handlers::update_availability).delete(handlers::delete_availability),
        )
        .with_state(state)
}
