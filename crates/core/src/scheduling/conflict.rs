use uuid::Uuid;

use crate::models::{booking::Booking, time::TimeRange};

/// First active booking in `bookings` whose interval intersects `range`.
///
/// Only `pending` and `scheduled` bookings hold time. `exclude` skips the
/// booking being modified so it does not collide with itself.
pub fn find_conflict<'a>(
    bookings: &'a [Booking],
    range: &TimeRange,
    exclude: Option<Uuid>,
) -> Option<&'a Booking> {
    bookings.iter().find(|booking| {
        booking.status.is_active()
            && Some(booking.id) != exclude
            && booking.time_range().overlaps(range)
    })
}

pub fn has_conflict(bookings: &[Booking], range: &TimeRange, exclude: Option<Uuid>) -> bool {
    find_conflict(bookings, range, exclude).is_some()
}
