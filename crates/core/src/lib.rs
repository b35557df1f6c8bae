//! # MentorSync Core
//!
//! Domain types and the scheduling engine for the mentorship marketplace:
//! availability windows, slot generation, conflict detection, the booking
//! state machine, and the coordinator that drives them through injected
//! stores and collaborators.

pub mod clock;
pub mod coordinator;
pub mod errors;
pub mod locks;
pub mod models;
pub mod ports;
pub mod scheduling;
