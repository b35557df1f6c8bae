use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{SchedulingError, SchedulingResult};

/// A wall-clock time of day with minute precision, written `HH:MM` (24-hour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallTime(u16);

impl WallTime {
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self(hour * 60 + minute))
    }

    /// Minutes past midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Returns `None` when the result would reach or pass midnight.
    pub fn add_minutes(self, minutes: u32) -> Option<Self> {
        let total = u32::from(self.0).checked_add(minutes)?;
        (total < 24 * 60).then(|| Self(total as u16))
    }

    /// Minutes elapsed from `earlier` to `self`, zero if `earlier` is later.
    pub fn minutes_since(self, earlier: WallTime) -> u32 {
        u32::from(self.0.saturating_sub(earlier.0))
    }

    /// Combines this time with a calendar date into a UTC instant.
    pub fn on(self, date: NaiveDate) -> DateTime<Utc> {
        date.and_time(NaiveTime::default()).and_utc() + Duration::minutes(i64::from(self.0))
    }

    /// Parses `value`, reporting failures against `field`.
    pub fn parse_field(field: &str, value: &str) -> SchedulingResult<Self> {
        value.parse().map_err(|_| {
            SchedulingError::validation(field, format!("'{value}' is not a valid HH:MM time"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidWallTime;

impl fmt::Display for InvalidWallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected a 24-hour HH:MM time")
    }
}

impl std::error::Error for InvalidWallTime {}

impl FromStr for WallTime {
    type Err = InvalidWallTime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 5 {
            return Err(InvalidWallTime);
        }
        let time = NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| InvalidWallTime)?;
        WallTime::from_hm(time.hour() as u16, time.minute() as u16).ok_or(InvalidWallTime)
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for WallTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WallTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(field: &str, value: &str) -> SchedulingResult<NaiveDate> {
    let invalid =
        || SchedulingError::validation(field, format!("'{value}' is not a valid YYYY-MM-DD date"));
    if value.len() != 10 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}

/// The Monday that starts the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Day of week as 0–6 with Sunday as 0.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Half-open instant interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn starting_at(start: DateTime<Utc>, minutes: u32) -> Self {
        Self::new(start, start + Duration::minutes(i64::from(minutes)))
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}
