use axum::http::{HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use mentorsync_api::routes::health::{HealthResponse, VersionResponse};
use mentorsync_core::models::mentor::MentorProfile;

use crate::test_utils::{actor, actor_header, TestContext};

#[tokio::test]
async fn test_health_and_version() {
    let ctx = TestContext::new();

    let health: HealthResponse = ctx.server.get("/health").await.json();
    assert_eq!(health.status, "ok");

    let version: VersionResponse = ctx.server.get("/version").await.json();
    assert_eq!(version.name, "mentorsync-api");
    assert!(!version.version.is_empty());
}

#[tokio::test]
async fn test_publish_windows_then_list_slots() {
    let ctx = TestContext::new();
    ctx.with_monday_morning().await;

    let response = ctx
        .server
        .get(&ctx.availability_url())
        .add_query_param("date", "2024-01-08")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["mentorId"], json!(ctx.mentor_id));
    assert_eq!(body["date"], "2024-01-08");
    assert_eq!(body["slots"], json!(["09:00", "09:30", "10:00", "10:30"]));

    assert!(ctx.slots("2024-01-09").await.is_empty());
}

#[tokio::test]
async fn test_slots_with_duration() {
    let ctx = TestContext::new();
    ctx.with_monday_morning().await;

    let body: Value = ctx
        .server
        .get(&ctx.availability_url())
        .add_query_param("date", "2024-01-08")
        .add_query_param("duration", 90)
        .await
        .json();
    assert_eq!(body["slots"], json!(["09:00", "09:30"]));
}

#[tokio::test]
async fn test_list_windows_returns_stored_set() {
    let ctx = TestContext::new();
    ctx.server
        .put(&ctx.availability_url())
        .add_header(actor_header(), actor(ctx.mentor_id))
        .json(&json!({
            "windows": [
                { "day": 1, "startTime": "09:00", "endTime": "11:00" },
                { "day": 3, "startTime": "14:00", "endTime": "15:00", "weekKey": "2024-01-10" }
            ]
        }))
        .await
        .assert_status_ok();

    let body: Value = ctx
        .server
        .get(&format!("{}/windows", ctx.availability_url()))
        .await
        .json();
    let windows = body["windows"].as_array().unwrap();
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0]["weekKey"], Value::Null);
    assert_eq!(windows[0]["status"], "active");
    assert_eq!(windows[1]["weekKey"], "2024-01-08");
    assert_eq!(windows[1]["startTime"], "14:00");
}

#[tokio::test]
async fn test_week_override_through_http() {
    let ctx = TestContext::new();
    ctx.server
        .put(&ctx.availability_url())
        .add_header(actor_header(), actor(ctx.mentor_id))
        .json(&json!({
            "windows": [
                { "day": 1, "startTime": "09:00", "endTime": "11:00" },
                { "day": 1, "startTime": "13:00", "endTime": "14:00", "weekKey": "2024-01-08" }
            ]
        }))
        .await
        .assert_status_ok();

    assert_eq!(ctx.slots("2024-01-08").await, vec!["13:00", "13:30"]);
    assert_eq!(ctx.slots("2024-01-15").await.len(), 4);
}

#[tokio::test]
async fn test_only_the_mentor_may_publish() {
    let ctx = TestContext::new();
    let body = json!({ "windows": [] });

    ctx.server
        .put(&ctx.availability_url())
        .json(&body)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    ctx.server
        .put(&ctx.availability_url())
        .add_header(actor_header(), HeaderValue::from_static("not-a-uuid"))
        .json(&body)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = ctx
        .server
        .put(&ctx.availability_url())
        .add_header(actor_header(), actor(ctx.mentee_id))
        .json(&body)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    let error: Value = response.json();
    assert!(error["error"].as_str().unwrap().contains("own availability"));
}

#[tokio::test]
async fn test_invalid_window_is_bad_request() {
    let ctx = TestContext::new();
    let response = ctx
        .server
        .put(&ctx.availability_url())
        .add_header(actor_header(), actor(ctx.mentor_id))
        .json(&json!({
            "windows": [
                { "day": 1, "startTime": "09:00", "endTime": "11:00" },
                { "day": 7, "startTime": "09:00", "endTime": "11:00" }
            ]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["field"], "windows[1].day");
}

#[tokio::test]
async fn test_slot_listing_errors() {
    let ctx = TestContext::new();

    ctx.server
        .get(&ctx.availability_url())
        .add_query_param("date", "08/01/2024")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = ctx
        .server
        .get(&ctx.availability_url())
        .add_query_param("date", "2024-01-08")
        .add_query_param("duration", u32::MAX)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["field"], "duration");

    ctx.server
        .get(&format!("/api/mentors/{}/availability", Uuid::new_v4()))
        .add_query_param("date", "2024-01-08")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let unverified = Uuid::new_v4();
    let mut profile = MentorProfile::new(unverified, "New Mentor", "new@example.com", 40.0);
    profile.is_verified = false;
    ctx.store.add_mentor(profile);
    ctx.server
        .get(&format!("/api/mentors/{unverified}/availability"))
        .add_query_param("date", "2024-01-08")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
