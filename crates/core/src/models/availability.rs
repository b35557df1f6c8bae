use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time::WallTime;

/// Structural identity of an availability window.
///
/// Two windows with the same day, times and week scope are the same window,
/// so saving them twice is an upsert rather than a duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowId {
    pub day: u8,
    pub start_time: WallTime,
    pub end_time: WallTime,
    pub week_key: Option<NaiveDate>,
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}-{}/", self.day, self.start_time, self.end_time)?;
        match self.week_key {
            Some(week) => write!(f, "{week}"),
            None => f.write_str("recurring"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowStatus {
    #[default]
    Active,
}

/// A validated availability window owned by a mentor.
///
/// Build through [`crate::scheduling::windows::normalize_windows`] so that
/// `id` always matches the other fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    pub id: WindowId,
    pub day: u8,
    pub start_time: WallTime,
    pub end_time: WallTime,
    pub week_key: Option<NaiveDate>,
    pub status: WindowStatus,
}

impl AvailabilityWindow {
    pub(crate) fn new(
        day: u8,
        start_time: WallTime,
        end_time: WallTime,
        week_key: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: WindowId {
                day,
                start_time,
                end_time,
                week_key,
            },
            day,
            start_time,
            end_time,
            week_key,
            status: WindowStatus::Active,
        }
    }

    pub fn is_recurring(&self) -> bool {
        self.week_key.is_none()
    }

    pub fn is_active(&self) -> bool {
        self.status == WindowStatus::Active
    }

    /// Whether `[start, end)` lies entirely inside this window.
    pub fn covers(&self, start: WallTime, end: WallTime) -> bool {
        self.start_time <= start && end <= self.end_time
    }
}

/// A window as submitted by a mentor, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowInput {
    pub day: i64,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub week_key: Option<String>,
}

impl WindowInput {
    pub fn recurring(day: i64, start_time: &str, end_time: &str) -> Self {
        Self {
            day,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            week_key: None,
        }
    }

    pub fn for_week(day: i64, start_time: &str, end_time: &str, week_key: &str) -> Self {
        Self {
            week_key: Some(week_key.to_string()),
            ..Self::recurring(day, start_time, end_time)
        }
    }
}
