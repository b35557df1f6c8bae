//! # Booking Handlers
//!
//! The acting user comes from [`ActorId`]; the coordinator decides whether
//! that user may see or change a booking, and hides bookings from anyone
//! who does not take part in them.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use mentorsync_core::models::{
    booking::Booking,
    requests::{BookingFilter, ReservationRequest},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    middleware::{auth::ActorId, error_handling::AppError},
    ApiState,
};

/// Body of `POST /api/bookings`; the mentee is the actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub mentor_id: Uuid,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub topic: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonRequest {
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingsResponse {
    pub bookings: Vec<Booking>,
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    ActorId(mentee_id): ActorId,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let Json(payload) = payload?;
    let request = ReservationRequest {
        mentor_id: payload.mentor_id,
        mentee_id,
        date: payload.date,
        start_time: payload.start_time,
        end_time: payload.end_time,
        topic: payload.topic,
        message: payload.message,
    };
    let booking = state.coordinator.reserve(&request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// `GET /api/bookings?role=mentor|mentee&status=pending|...`
#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    ActorId(actor_id): ActorId,
    Query(filter): Query<BookingFilter>,
) -> Result<Json<BookingsResponse>, AppError> {
    let bookings = state.coordinator.list_bookings(actor_id, filter).await?;
    Ok(Json(BookingsResponse { bookings }))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    ActorId(actor_id): ActorId,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(state.coordinator.get_booking(actor_id, id).await?))
}

#[axum::debug_handler]
pub async fn approve_booking(
    State(state): State<Arc<ApiState>>,
    ActorId(mentor_id): ActorId,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(state.coordinator.approve(mentor_id, id).await?))
}

#[axum::debug_handler]
pub async fn decline_booking(
    State(state): State<Arc<ApiState>>,
    ActorId(mentor_id): ActorId,
    Path(id): Path<Uuid>,
    payload: Result<Json<ReasonRequest>, JsonRejection>,
) -> Result<Json<Booking>, AppError> {
    let Json(payload) = payload?;
    let booking = state
        .coordinator
        .decline(mentor_id, id, &payload.reason)
        .await?;
    Ok(Json(booking))
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    ActorId(actor_id): ActorId,
    Path(id): Path<Uuid>,
    payload: Result<Json<ReasonRequest>, JsonRejection>,
) -> Result<Json<Booking>, AppError> {
    let Json(payload) = payload?;
    let booking = state
        .coordinator
        .cancel(actor_id, id, &payload.reason)
        .await?;
    Ok(Json(booking))
}

/// The body is optional; send `{ "notes": "..." }` to record session notes.
#[axum::debug_handler]
pub async fn complete_booking(
    State(state): State<Arc<ApiState>>,
    ActorId(mentor_id): ActorId,
    Path(id): Path<Uuid>,
    payload: Option<Json<CompleteRequest>>,
) -> Result<Json<Booking>, AppError> {
    let payload = payload.map(|Json(body)| body).unwrap_or_default();
    let booking = state
        .coordinator
        .complete(mentor_id, id, payload.notes.as_deref())
        .await?;
    Ok(Json(booking))
}

#[axum::debug_handler]
pub async fn mark_no_show(
    State(state): State<Arc<ApiState>>,
    ActorId(mentor_id): ActorId,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(state.coordinator.mark_no_show(mentor_id, id).await?))
}

#[axum::debug_handler]
pub async fn submit_feedback(
    State(state): State<Arc<ApiState>>,
    ActorId(mentee_id): ActorId,
    Path(id): Path<Uuid>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload?;
    state
        .coordinator
        .submit_feedback(mentee_id, id, payload.rating, payload.comment.as_deref())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
