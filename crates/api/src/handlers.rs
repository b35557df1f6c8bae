/// Mentor availability: windows and bookable slots
pub mod availability;
/// Booking reservation, lifecycle transitions and queries
pub mod booking;
