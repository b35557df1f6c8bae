use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;

use mentorsync_core::{errors::SchedulingError, ports::MentorDirectory};
use mentorsync_db::mock::collaborators::MockMeetingLinks;

use crate::test_utils::{actor, actor_header, booking_body, TestContext};

fn session_start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap()
}

#[tokio::test]
async fn test_reserve_returns_pending_booking() {
    let ctx = TestContext::new();
    ctx.with_monday_morning().await;

    let response = ctx
        .server
        .post("/api/bookings")
        .add_header(actor_header(), actor(ctx.mentee_id))
        .json(&booking_body(ctx.mentor_id, "09:00", "09:30"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let booking: Value = response.json();
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["menteeId"], json!(ctx.mentee_id));
    assert_eq!(booking["scheduledAt"], "2024-01-08T09:00:00Z");
    assert_eq!(booking["duration"], 30);
    assert_eq!(booking["price"], 30.0);
    assert_eq!(booking["notes"]["menteeNotes"], "First session");
    assert_eq!(booking["mentorAvailabilityId"]["day"], 1);

    assert_eq!(ctx.slots("2024-01-08").await, vec!["09:30", "10:00", "10:30"]);
}

#[rstest]
#[case::outside_window("08:00", "08:30")]
#[case::overlaps_booking("09:15", "09:45")]
#[tokio::test]
async fn test_reserve_conflicts(#[case] start: &str, #[case] end: &str) {
    let ctx = TestContext::new();
    ctx.with_monday_morning().await;
    ctx.reserve("09:00", "09:30").await;

    let response = ctx
        .server
        .post("/api/bookings")
        .add_header(actor_header(), actor(ctx.mentee_id))
        .json(&booking_body(ctx.mentor_id, start, end))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[rstest]
#[case::malformed_time("9am", "09:30", "startTime")]
#[case::reversed("10:00", "09:00", "endTime")]
#[case::too_short("09:00", "09:05", "duration")]
#[tokio::test]
async fn test_reserve_validation(#[case] start: &str, #[case] end: &str, #[case] field: &str) {
    let ctx = TestContext::new();
    ctx.with_monday_morning().await;

    let response = ctx
        .server
        .post("/api/bookings")
        .add_header(actor_header(), actor(ctx.mentee_id))
        .json(&booking_body(ctx.mentor_id, start, end))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["field"], field);
}

#[tokio::test]
async fn test_reserve_with_undecodable_body() {
    let ctx = TestContext::new();
    ctx.with_monday_morning().await;

    let response = ctx
        .server
        .post("/api/bookings")
        .add_header(actor_header(), actor(ctx.mentee_id))
        .json(&json!({
            "mentorId": ctx.mentor_id,
            "date": "2024-01-08",
            "startTime": "09:00",
            "endTime": "09:30"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["field"], "body");
    assert!(body["error"].as_str().unwrap().contains("topic"));
}

#[tokio::test]
async fn test_reserve_requires_actor() {
    let ctx = TestContext::new();
    ctx.with_monday_morning().await;

    ctx.server
        .post("/api/bookings")
        .json(&booking_body(ctx.mentor_id, "09:00", "09:30"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_full_session_lifecycle() {
    let ctx = TestContext::new();
    ctx.with_monday_morning().await;
    let id = ctx.reserve("09:00", "09:30").await;

    let approved = ctx.transition(ctx.mentor_id, id, "approve", json!({})).await;
    approved.assert_status_ok();
    let approved: Value = approved.json();
    assert_eq!(approved["status"], "scheduled");
    assert!(approved["meetingLink"]["joinUrl"]
        .as_str()
        .unwrap()
        .starts_with("https://meet.mentorsync.local/"));

    ctx.clock.set(session_start() + Duration::minutes(30));
    let completed = ctx
        .transition(ctx.mentor_id, id, "complete", json!({ "notes": "Went well" }))
        .await;
    completed.assert_status_ok();
    let completed: Value = completed.json();
    assert_eq!(completed["status"], "completed");
    assert_eq!(completed["notes"]["mentorNotes"], "Went well");

    ctx.transition(ctx.mentee_id, id, "feedback", json!({ "rating": 5, "comment": "Great" }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let mistyped = ctx
        .transition(ctx.mentee_id, id, "feedback", json!({ "rating": "five" }))
        .await;
    mistyped.assert_status(StatusCode::BAD_REQUEST);
    let mistyped: Value = mistyped.json();
    assert_eq!(mistyped["field"], "body");

    let again = ctx
        .transition(ctx.mentee_id, id, "feedback", json!({ "rating": 2 }))
        .await;
    again.assert_status(StatusCode::BAD_REQUEST);
    let again: Value = again.json();
    assert_eq!(again["field"], "feedback");

    let mentor = ctx
        .store
        .mentors
        .find_mentor(ctx.mentor_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mentor.total_sessions, 1);
    assert_eq!(mentor.rating, 5.0);
    assert_eq!(mentor.review_count, 1);

    let booking: Value = ctx
        .server
        .get(&format!("/api/bookings/{id}"))
        .add_header(actor_header(), actor(ctx.mentee_id))
        .await
        .json();
    assert_eq!(booking["feedback"]["rating"], 5);
    assert_eq!(booking["feedback"]["comment"], "Great");
}

#[tokio::test]
async fn test_complete_without_body() {
    let ctx = TestContext::new();
    ctx.with_monday_morning().await;
    let id = ctx.reserve("09:00", "09:30").await;
    ctx.transition(ctx.mentor_id, id, "approve", json!({}))
        .await
        .assert_status_ok();

    let response = ctx
        .server
        .post(&format!("/api/bookings/{id}/complete"))
        .add_header(actor_header(), actor(ctx.mentor_id))
        .await;
    response.assert_status_ok();
    let booking: Value = response.json();
    assert_eq!(booking["status"], "completed");
}

#[tokio::test]
async fn test_cancel_notice_window() {
    let ctx = TestContext::new();
    ctx.with_monday_morning().await;
    let id = ctx.reserve("09:00", "09:30").await;
    ctx.transition(ctx.mentor_id, id, "approve", json!({}))
        .await
        .assert_status_ok();

    ctx.clock
        .set(session_start() - Duration::hours(24) + Duration::seconds(1));
    let late = ctx
        .transition(ctx.mentee_id, id, "cancel", json!({ "reason": "Sick" }))
        .await;
    late.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    ctx.clock.set(session_start() - Duration::hours(24));
    let cancelled = ctx
        .transition(ctx.mentee_id, id, "cancel", json!({ "reason": "Sick" }))
        .await;
    cancelled.assert_status_ok();
    let cancelled: Value = cancelled.json();
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(cancelled["notes"]["menteeNotes"], "First session\nCancellation reason: Sick");

    assert_eq!(ctx.slots("2024-01-08").await.len(), 4);
}

#[tokio::test]
async fn test_cancel_requires_reason() {
    let ctx = TestContext::new();
    ctx.with_monday_morning().await;
    let id = ctx.reserve("09:00", "09:30").await;
    ctx.transition(ctx.mentor_id, id, "approve", json!({}))
        .await
        .assert_status_ok();

    let response = ctx
        .transition(ctx.mentor_id, id, "cancel", json!({ "reason": "  " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_decline_and_no_show() {
    let ctx = TestContext::new();
    ctx.with_monday_morning().await;
    let declined = ctx.reserve("09:00", "09:30").await;
    let missed = ctx.reserve("10:00", "10:30").await;

    let response = ctx
        .transition(ctx.mentor_id, declined, "decline", json!({ "reason": "Fully booked" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "cancelled");
    assert_eq!(body["notes"]["mentorNotes"], "Declined: Fully booked");

    let response = ctx.transition(ctx.mentor_id, missed, "no-show", json!({})).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "no-show");

    ctx.transition(ctx.mentor_id, missed, "approve", json!({}))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_wrong_party_sees_not_found() {
    let ctx = TestContext::new();
    ctx.with_monday_morning().await;
    let id = ctx.reserve("09:00", "09:30").await;

    ctx.transition(ctx.mentee_id, id, "approve", json!({}))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    ctx.server
        .get(&format!("/api/bookings/{id}"))
        .add_header(actor_header(), actor(Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    ctx.server
        .get(&format!("/api/bookings/{}", Uuid::new_v4()))
        .add_header(actor_header(), actor(ctx.mentee_id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_bookings_filters() {
    let ctx = TestContext::new();
    ctx.with_monday_morning().await;
    let first = ctx.reserve("09:00", "09:30").await;
    let second = ctx.reserve("10:00", "10:30").await;
    ctx.transition(ctx.mentor_id, second, "approve", json!({}))
        .await
        .assert_status_ok();

    let ids = |body: Value| -> Vec<String> {
        body["bookings"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["id"].as_str().unwrap().to_string())
            .collect()
    };

    let all: Value = ctx
        .server
        .get("/api/bookings")
        .add_header(actor_header(), actor(ctx.mentee_id))
        .await
        .json();
    assert_eq!(ids(all), vec![first.to_string(), second.to_string()]);

    let scheduled: Value = ctx
        .server
        .get("/api/bookings")
        .add_query_param("role", "mentor")
        .add_query_param("status", "scheduled")
        .add_header(actor_header(), actor(ctx.mentor_id))
        .await
        .json();
    assert_eq!(ids(scheduled), vec![second.to_string()]);

    let as_mentor: Value = ctx
        .server
        .get("/api/bookings")
        .add_query_param("role", "mentor")
        .add_header(actor_header(), actor(ctx.mentee_id))
        .await
        .json();
    assert!(ids(as_mentor).is_empty());
}

#[tokio::test]
async fn test_meeting_failure_is_bad_gateway() {
    let mut meetings = MockMeetingLinks::new();
    meetings.expect_create_meeting().times(1).returning(|_| {
        Err(SchedulingError::Upstream {
            service: "meeting-link provider",
            message: "Meeting service failed. Status: 503".to_string(),
        })
    });
    let ctx = TestContext::with_meetings(Arc::new(meetings));
    ctx.with_monday_morning().await;
    let id = ctx.reserve("09:00", "09:30").await;

    let response = ctx.transition(ctx.mentor_id, id, "approve", json!({})).await;
    response.assert_status(StatusCode::BAD_GATEWAY);

    let booking: Value = ctx
        .server
        .get(&format!("/api/bookings/{id}"))
        .add_header(actor_header(), actor(ctx.mentor_id))
        .await
        .json();
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["meetingLink"], Value::Null);
}
