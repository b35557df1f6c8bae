use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::availability::WindowId;
use super::time::TimeRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Pending,
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    /// Active bookings hold their interval on the mentor's calendar.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Scheduled)
    }

    pub fn is_terminal(self) -> bool {
        !self.is_active()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no-show",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no-show" => Ok(Self::NoShow),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

/// Which side of a booking a user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Mentor,
    Mentee,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionNotes {
    pub mentor_notes: Option<String>,
    pub mentee_notes: Option<String>,
    pub shared_notes: Option<String>,
}

impl SessionNotes {
    pub fn for_party_mut(&mut self, party: Party) -> &mut Option<String> {
        match party {
            Party::Mentor => &mut self.mentor_notes,
            Party::Mentee => &mut self.mentee_notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingLink {
    pub join_url: String,
    pub external_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub rating: u8,
    pub comment: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    /// Minutes.
    pub duration: u32,
    pub status: BookingStatus,
    pub topic: String,
    pub notes: SessionNotes,
    pub meeting_link: Option<MeetingLink>,
    pub price: f64,
    pub feedback: Option<Feedback>,
    pub mentor_availability_id: WindowId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.scheduled_at + Duration::minutes(i64::from(self.duration))
    }

    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.scheduled_at, self.ends_at())
    }

    /// The side `user_id` is on, or `None` for outsiders.
    pub fn party_of(&self, user_id: Uuid) -> Option<Party> {
        if user_id == self.mentor_id {
            Some(Party::Mentor)
        } else if user_id == self.mentee_id {
            Some(Party::Mentee)
        } else {
            None
        }
    }
}
