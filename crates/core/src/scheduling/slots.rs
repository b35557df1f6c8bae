use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::{conflict::has_conflict, windows::windows_for_date};
use crate::models::{
    availability::AvailabilityWindow,
    booking::Booking,
    time::{TimeRange, WallTime},
};

/// Expands the windows that apply on `date` into bookable slot start times.
///
/// Each window is walked from its start in `granularity` steps; a slot is
/// emitted while `slot + granularity` still fits in the window. A slot is
/// dropped when the time it would hold intersects an active booking.
///
/// Without `duration` the held time is one granularity step, so a listed
/// slot only promises that step is free. With `duration` the slot must also
/// fit `slot + duration` inside the window, and the held time grows to
/// `max(granularity, duration)`, so every listed slot can be reserved for
/// that duration.
pub fn generate_slots(
    windows: &[AvailabilityWindow],
    bookings: &[Booking],
    date: NaiveDate,
    granularity: u32,
    duration: Option<u32>,
) -> Vec<WallTime> {
    let step = granularity.max(1);
    let hold = duration.map_or(step, |d| d.max(step));
    let mut slots = BTreeSet::new();

    for window in windows_for_date(windows, date) {
        let mut cursor = window.start_time;
        while let Some(next) = cursor.add_minutes(step) {
            if next > window.end_time {
                break;
            }
            if let Some(requested) = duration {
                match cursor.add_minutes(requested) {
                    Some(end) if end <= window.end_time => {}
                    _ => break,
                }
            }

            let held = TimeRange::starting_at(cursor.on(date), hold);
            if !has_conflict(bookings, &held, None) {
                slots.insert(cursor);
            }
            cursor = next;
        }
    }

    slots.into_iter().collect()
}
