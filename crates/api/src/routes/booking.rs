use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers::booking, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/bookings",
            post(booking::create_booking).get(booking::list_bookings),
        )
        .route("/api/bookings/:id", get(booking::get_booking))
        .route("/api/bookings/:id/approve", post(booking::approve_booking))
        .route("/api/bookings/:id/decline", post(booking::decline_booking))
        .route("/api/bookings/:id/cancel", post(booking::cancel_booking))
        .route("/api/bookings/:id/complete", post(booking::complete_booking))
        .route("/api/bookings/:id/no-show", post(booking::mark_no_show))
        .route("/api/bookings/:id/feedback", post(booking::submit_feedback))
}
