//! Pure scheduling rules: window validation, slot expansion, conflict
//! detection, the booking state machine and rating aggregation. Nothing in
//! here touches a store.

pub mod conflict;
pub mod lifecycle;
pub mod rating;
pub mod slots;
pub mod windows;

use chrono::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingPolicy {
    /// Step between listed slot start times, and each slot's own length.
    pub granularity_minutes: u32,
    pub min_duration_minutes: u32,
    /// How far ahead of the start a scheduled booking may still be cancelled.
    pub cancellation_notice: Duration,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            granularity_minutes: 30,
            min_duration_minutes: 15,
            cancellation_notice: Duration::hours(24),
        }
    }
}
