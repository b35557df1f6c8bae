use crate::models::booking::{Booking, BookingStatus};

/// Mean feedback rating over completed bookings and how many were counted.
/// `(0.0, 0)` when nothing has been rated yet.
pub fn aggregate_rating(bookings: &[Booking]) -> (f64, u32) {
    let ratings: Vec<u8> = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Completed)
        .filter_map(|b| b.feedback.as_ref().map(|f| f.rating))
        .collect();

    if ratings.is_empty() {
        return (0.0, 0);
    }
    let total: u32 = ratings.iter().map(|&r| u32::from(r)).sum();
    let count = ratings.len() as u32;
    (f64::from(total) / f64::from(count), count)
}
