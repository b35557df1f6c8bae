use std::collections::HashMap;

use chrono::NaiveDate;

use crate::errors::{SchedulingError, SchedulingResult};
use crate::models::{
    availability::{AvailabilityWindow, WindowId, WindowInput},
    time::{day_of_week, monday_of, parse_date, WallTime},
};

/// Validates a submitted window set and collapses duplicate ids, keeping the
/// last occurrence at the position of the first.
///
/// A `weekKey` that is not a Monday is moved to the Monday of its week.
pub fn normalize_windows(inputs: &[WindowInput]) -> SchedulingResult<Vec<AvailabilityWindow>> {
    let mut windows: Vec<AvailabilityWindow> = Vec::with_capacity(inputs.len());
    let mut positions: HashMap<WindowId, usize> = HashMap::new();

    for (index, input) in inputs.iter().enumerate() {
        let window = validate_window(index, input)?;
        match positions.get(&window.id) {
            Some(&at) => windows[at] = window,
            None => {
                positions.insert(window.id, windows.len());
                windows.push(window);
            }
        }
    }

    Ok(windows)
}

fn validate_window(index: usize, input: &WindowInput) -> SchedulingResult<AvailabilityWindow> {
    let field = |name: &str| format!("windows[{index}].{name}");

    if !(0..=6).contains(&input.day) {
        return Err(SchedulingError::validation(
            field("day"),
            format!("day must be between 0 and 6, got {}", input.day),
        ));
    }
    let start = WallTime::parse_field(&field("startTime"), &input.start_time)?;
    let end = WallTime::parse_field(&field("endTime"), &input.end_time)?;
    if start >= end {
        return Err(SchedulingError::validation(
            field("endTime"),
            format!("end time {end} must be after start time {start}"),
        ));
    }
    let week_key = input
        .week_key
        .as_deref()
        .map(|raw| parse_date(&field("weekKey"), raw).map(monday_of))
        .transpose()?;

    Ok(AvailabilityWindow::new(input.day as u8, start, end, week_key))
}

/// Windows that apply on `date`.
///
/// Week-specific windows for that weekday replace the recurring ones
/// entirely; the two sets are never merged.
pub fn windows_for_date(windows: &[AvailabilityWindow], date: NaiveDate) -> Vec<&AvailabilityWindow> {
    let day = day_of_week(date);
    let week = monday_of(date);

    let specific: Vec<&AvailabilityWindow> = windows
        .iter()
        .filter(|w| w.is_active() && w.day == day && w.week_key == Some(week))
        .collect();
    if !specific.is_empty() {
        return specific;
    }

    windows
        .iter()
        .filter(|w| w.is_active() && w.day == day && w.is_recurring())
        .collect()
}

/// The applicable window that fully contains `[start, end)` on `date`.
pub fn covering_window(
    windows: &[AvailabilityWindow],
    date: NaiveDate,
    start: WallTime,
    end: WallTime,
) -> Option<&AvailabilityWindow> {
    windows_for_date(windows, date)
        .into_iter()
        .find(|w| w.covers(start, end))
}
