//! Booking state machine.
//!
//! ```text
//! pending ──approve──▶ scheduled ──complete──▶ completed ──feedback (once)
//!    │                    │
//!    ├──decline──▶ cancelled ◀──cancel (≥ notice before start)
//!    └──────no-show──────┴──▶ no-show
//! ```
//!
//! Every rejected transition reports the booking's current status.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::SchedulingPolicy;
use crate::errors::{SchedulingError, SchedulingResult};
use crate::models::{
    availability::WindowId,
    booking::{Booking, BookingStatus, Feedback, MeetingLink, Party, SessionNotes},
};

/// Everything needed to open a booking, already resolved by the caller.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration: u32,
    pub topic: String,
    pub message: Option<String>,
    pub price: f64,
    pub window: WindowId,
}

fn append_note(slot: &mut Option<String>, text: String) {
    match slot {
        Some(existing) if !existing.is_empty() => {
            existing.push('\n');
            existing.push_str(&text);
        }
        _ => *slot = Some(text),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

impl Booking {
    /// Opens a booking in `pending`.
    pub fn create(
        new: NewBooking,
        now: DateTime<Utc>,
        policy: &SchedulingPolicy,
    ) -> SchedulingResult<Self> {
        if new.scheduled_at <= now {
            return Err(SchedulingError::validation(
                "scheduledAt",
                "Booking must be scheduled in the future",
            ));
        }
        if new.duration < policy.min_duration_minutes {
            return Err(SchedulingError::validation(
                "duration",
                format!(
                    "Session must last at least {} minutes",
                    policy.min_duration_minutes
                ),
            ));
        }
        let topic = new.topic.trim();
        if topic.is_empty() {
            return Err(SchedulingError::validation("topic", "Topic is required"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            mentor_id: new.mentor_id,
            mentee_id: new.mentee_id,
            scheduled_at: new.scheduled_at,
            duration: new.duration,
            status: BookingStatus::Pending,
            topic: topic.to_string(),
            notes: SessionNotes {
                mentee_notes: non_blank(new.message.as_deref()),
                ..SessionNotes::default()
            },
            meeting_link: None,
            price: new.price,
            feedback: None,
            mentor_availability_id: new.window,
            created_at: now,
            updated_at: now,
        })
    }

    /// `pending → scheduled`. A link passed here replaces any stored one.
    pub fn approve(&mut self, link: Option<MeetingLink>, now: DateTime<Utc>) -> SchedulingResult<()> {
        if self.status != BookingStatus::Pending {
            return Err(SchedulingError::illegal_transition("approve", self.status));
        }
        if link.is_some() {
            self.meeting_link = link;
        }
        self.status = BookingStatus::Scheduled;
        self.updated_at = now;
        Ok(())
    }

    /// `pending → cancelled`, the mentor turning a request down.
    pub fn decline(&mut self, reason: &str, now: DateTime<Utc>) -> SchedulingResult<()> {
        if self.status != BookingStatus::Pending {
            return Err(SchedulingError::illegal_transition("decline", self.status));
        }
        let reason = non_blank(Some(reason))
            .ok_or_else(|| SchedulingError::validation("reason", "A reason is required"))?;

        append_note(&mut self.notes.mentor_notes, format!("Declined: {reason}"));
        self.status = BookingStatus::Cancelled;
        self.updated_at = now;
        Ok(())
    }

    /// `scheduled → cancelled`, allowed up to `policy.cancellation_notice`
    /// before the start (the boundary itself is allowed).
    pub fn cancel(
        &mut self,
        party: Party,
        reason: &str,
        now: DateTime<Utc>,
        policy: &SchedulingPolicy,
    ) -> SchedulingResult<()> {
        if self.status != BookingStatus::Scheduled {
            return Err(SchedulingError::illegal_transition("cancel", self.status));
        }
        let reason = non_blank(Some(reason)).ok_or_else(|| {
            SchedulingError::validation("reason", "A cancellation reason is required")
        })?;
        if now > self.scheduled_at - policy.cancellation_notice {
            return Err(SchedulingError::IllegalTransition {
                status: self.status,
                message: format!(
                    "Bookings can only be cancelled at least {} hours before the session",
                    policy.cancellation_notice.num_hours()
                ),
            });
        }

        append_note(
            self.notes.for_party_mut(party),
            format!("Cancellation reason: {reason}"),
        );
        self.status = BookingStatus::Cancelled;
        self.updated_at = now;
        Ok(())
    }

    /// `scheduled → completed`.
    pub fn complete(&mut self, notes: Option<&str>, now: DateTime<Utc>) -> SchedulingResult<()> {
        if self.status != BookingStatus::Scheduled {
            return Err(SchedulingError::illegal_transition("complete", self.status));
        }
        if let Some(notes) = non_blank(notes) {
            append_note(&mut self.notes.mentor_notes, notes);
        }
        self.status = BookingStatus::Completed;
        self.updated_at = now;
        Ok(())
    }

    /// `pending | scheduled → no-show`.
    pub fn mark_no_show(&mut self, now: DateTime<Utc>) -> SchedulingResult<()> {
        if !self.status.is_active() {
            return Err(SchedulingError::illegal_transition(
                "mark as no-show",
                self.status,
            ));
        }
        self.status = BookingStatus::NoShow;
        self.updated_at = now;
        Ok(())
    }

    /// Attaches the mentee's rating. Only once, only on completed bookings.
    pub fn add_feedback(
        &mut self,
        rating: i64,
        comment: Option<&str>,
        now: DateTime<Utc>,
    ) -> SchedulingResult<()> {
        if self.status != BookingStatus::Completed {
            return Err(SchedulingError::illegal_transition(
                "submit feedback for",
                self.status,
            ));
        }
        if self.feedback.is_some() {
            return Err(SchedulingError::validation(
                "feedback",
                "Feedback has already been submitted for this booking",
            ));
        }
        if !(1..=5).contains(&rating) {
            return Err(SchedulingError::validation(
                "rating",
                format!("rating must be between 1 and 5, got {rating}"),
            ));
        }

        self.feedback = Some(Feedback {
            rating: rating as u8,
            comment: non_blank(comment),
            submitted_at: now,
        });
        self.updated_at = now;
        Ok(())
    }
}
