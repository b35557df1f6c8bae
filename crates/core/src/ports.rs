//! Seams between the scheduling engine and the outside world.
//!
//! Stores are implemented by `mentorsync-db`; the meeting-link provider and
//! notification gateway by the transport layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SchedulingResult;
use crate::models::{
    availability::AvailabilityWindow,
    booking::{Booking, MeetingLink},
    mentor::{MentorProfile, UserContact},
};

#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    async fn list_windows(&self, mentor_id: Uuid) -> SchedulingResult<Vec<AvailabilityWindow>>;

    /// Replaces the mentor's whole window set.
    async fn replace_windows(
        &self,
        mentor_id: Uuid,
        windows: Vec<AvailabilityWindow>,
    ) -> SchedulingResult<Vec<AvailabilityWindow>>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> SchedulingResult<Option<Booking>>;

    async fn list_for_mentor(&self, mentor_id: Uuid) -> SchedulingResult<Vec<Booking>>;

    async fn list_for_mentee(&self, mentee_id: Uuid) -> SchedulingResult<Vec<Booking>>;

    /// Inserts `booking` only if no active booking of the same mentor
    /// overlaps it. The check and the insert must be atomic with respect to
    /// other `reserve` calls for that mentor; a clash returns
    /// `SchedulingError::Conflict`.
    async fn reserve(&self, booking: Booking) -> SchedulingResult<Booking>;

    async fn update(&self, booking: &Booking) -> SchedulingResult<Booking>;
}

#[async_trait]
pub trait MentorDirectory: Send + Sync {
    async fn find_mentor(&self, mentor_id: Uuid) -> SchedulingResult<Option<MentorProfile>>;

    async fn record_completed_session(&self, mentor_id: Uuid) -> SchedulingResult<MentorProfile>;

    async fn update_rating(
        &self,
        mentor_id: Uuid,
        rating: f64,
        review_count: u32,
    ) -> SchedulingResult<MentorProfile>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_user(&self, user_id: Uuid) -> SchedulingResult<Option<UserContact>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRequest {
    pub topic: String,
    pub start: DateTime<Utc>,
    pub duration_minutes: u32,
    pub attendee_emails: Vec<String>,
}

#[async_trait]
pub trait MeetingLinkProvider: Send + Sync {
    async fn create_meeting(&self, request: &MeetingRequest) -> SchedulingResult<MeetingLink>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Requested,
    Approved,
    Declined,
    Cancelled,
    Completed,
    NoShow,
    FeedbackReceived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingNotification {
    pub kind: NotificationKind,
    pub booking: Booking,
}

/// Fire-and-forget delivery; the coordinator logs and drops any error.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn notify(&self, notification: &BookingNotification) -> eyre::Result<()>;
}
