use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;

use mentorsync_api::middleware::error_handling::{map_error, AppError};
use mentorsync_core::{errors::SchedulingError, models::booking::BookingStatus};

async fn body_of(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[rstest]
#[case::validation(SchedulingError::validation("date", "Expected YYYY-MM-DD"), StatusCode::BAD_REQUEST)]
#[case::not_found(SchedulingError::NotFound("Booking with ID 1 not found".into()), StatusCode::NOT_FOUND)]
#[case::conflict(SchedulingError::Conflict("The selected time slot is already booked".into()), StatusCode::CONFLICT)]
#[case::illegal_transition(
    SchedulingError::illegal_transition("approve", BookingStatus::Completed),
    StatusCode::UNPROCESSABLE_ENTITY
)]
#[case::upstream(
    SchedulingError::Upstream { service: "meeting-link provider", message: "timeout".into() },
    StatusCode::BAD_GATEWAY
)]
#[case::storage(SchedulingError::Storage(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[tokio::test]
async fn test_error_status_mapping(#[case] error: SchedulingError, #[case] expected: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response = map_error(SchedulingError::illegal_transition(
        "cancel",
        BookingStatus::Completed,
    ));
    let body = body_of(response).await;

    assert_eq!(body["error"], "Cannot cancel a booking with status: completed");
    assert!(body.get("field").is_none());
}

#[tokio::test]
async fn test_validation_body_names_field() {
    let response = map_error(SchedulingError::validation("rating", "out of range"));
    let body = body_of(response).await;

    assert_eq!(body["field"], "rating");
    assert_eq!(body["error"], "Validation error: rating: out of range");
}

#[tokio::test]
async fn test_identity_errors() {
    let response = AppError::Unauthorized("Missing X-User-Id header".into()).into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_of(response).await["error"], "Missing X-User-Id header");

    let response = AppError::Forbidden("nope".into()).into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_storage_error_body() {
    let response = map_error(SchedulingError::Storage(eyre::eyre!("pool exhausted")));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_of(response).await["error"], "Storage error: pool exhausted");
}
