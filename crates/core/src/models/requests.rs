use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::booking::{BookingStatus, Party};

/// A mentee's request to reserve `[start_time, end_time)` on `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub topic: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingFilter {
    pub role: Option<Party>,
    pub status: Option<BookingStatus>,
}
