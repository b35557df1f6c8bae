pub mod availability;
pub mod booking;
pub mod mentor;
pub mod requests;
pub mod time;
