//! # Availability Handlers
//!
//! Mentors publish their weekly windows with a full-set `PUT`; anyone can
//! read the windows and the bookable slots for a date.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use mentorsync_core::models::{
    availability::{AvailabilityWindow, WindowInput},
    time::WallTime,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    middleware::{auth::ActorId, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    /// `YYYY-MM-DD`
    pub date: String,
    /// Session length in minutes; every returned slot can hold it.
    pub duration: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsResponse {
    pub mentor_id: Uuid,
    pub date: String,
    pub slots: Vec<WallTime>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub windows: Vec<WindowInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WindowsResponse {
    pub windows: Vec<AvailabilityWindow>,
}

/// `GET /api/mentors/:mentor_id/availability?date=YYYY-MM-DD&duration=60`
#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Path(mentor_id): Path<Uuid>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let slots = state
        .coordinator
        .list_availability(mentor_id, &query.date, query.duration)
        .await?;

    Ok(Json(SlotsResponse {
        mentor_id,
        date: query.date,
        slots,
    }))
}

#[axum::debug_handler]
pub async fn list_windows(
    State(state): State<Arc<ApiState>>,
    Path(mentor_id): Path<Uuid>,
) -> Result<Json<WindowsResponse>, AppError> {
    let windows = state.coordinator.list_windows(mentor_id).await?;
    Ok(Json(WindowsResponse { windows }))
}

/// Replaces the mentor's whole window set. Only the mentor may do this.
#[axum::debug_handler]
pub async fn update_windows(
    State(state): State<Arc<ApiState>>,
    actor: ActorId,
    Path(mentor_id): Path<Uuid>,
    payload: Result<Json<UpdateAvailabilityRequest>, JsonRejection>,
) -> Result<Json<WindowsResponse>, AppError> {
    let Json(payload) = payload?;
    let mentor_id = actor.require(mentor_id)?;
    let windows = state
        .coordinator
        .update_availability(mentor_id, &payload.windows)
        .await?;
    Ok(Json(WindowsResponse { windows }))
}
