use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorProfile {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub hourly_rate: f64,
    pub is_verified: bool,
    pub total_sessions: u32,
    pub rating: f64,
    pub review_count: u32,
}

impl MentorProfile {
    pub fn new(id: Uuid, display_name: &str, email: &str, hourly_rate: f64) -> Self {
        Self {
            id,
            display_name: display_name.to_string(),
            email: email.to_string(),
            hourly_rate,
            is_verified: true,
            total_sessions: 0,
            rating: 0.0,
            review_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContact {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
}
