use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/mentors/:mentor_id/availability",
            get(handlers::availability::list_slots).put(handlers::availability::update_windows),
        )
        .route(
            "/api/mentors/:mentor_id/availability/windows",
            get(handlers::availability::list_windows),
        )
}
