//! # Scheduling Coordinator
//!
//! Ties the stores, the pure scheduling rules and the external collaborators
//! together behind the operations the transport layer exposes.
//!
//! Every operation that changes a booking runs under the owning mentor's
//! lock from [`MentorLocks`], and re-reads the booking once the lock is held.
//! For reservations the booking store's own atomic `reserve` is a second
//! line: even a store shared by several coordinators never accepts two
//! overlapping active bookings for one mentor.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::errors::{SchedulingError, SchedulingResult};
use crate::locks::{MentorGuard, MentorLocks};
use crate::models::{
    availability::{AvailabilityWindow, WindowInput},
    booking::{Booking, BookingStatus, MeetingLink, Party},
    mentor::MentorProfile,
    requests::{BookingFilter, ReservationRequest},
    time::{parse_date, TimeRange, WallTime},
};
use crate::ports::{
    AvailabilityStore, BookingNotification, BookingStore, MeetingLinkProvider, MeetingRequest,
    MentorDirectory, NotificationGateway, NotificationKind, UserDirectory,
};
use crate::scheduling::{
    conflict::has_conflict,
    lifecycle::NewBooking,
    rating::aggregate_rating,
    slots::generate_slots,
    windows::{covering_window, normalize_windows},
    SchedulingPolicy,
};

const MEETING_SERVICE: &str = "meeting-link provider";
const MINUTES_PER_DAY: u32 = 24 * 60;

/// The coordinator's injected dependencies.
#[derive(Clone)]
pub struct Collaborators {
    pub availability: Arc<dyn AvailabilityStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub mentors: Arc<dyn MentorDirectory>,
    pub users: Arc<dyn UserDirectory>,
    pub meetings: Arc<dyn MeetingLinkProvider>,
    pub notifications: Arc<dyn NotificationGateway>,
    pub clock: Arc<dyn Clock>,
}

pub struct SchedulingCoordinator {
    deps: Collaborators,
    locks: Arc<MentorLocks>,
    policy: SchedulingPolicy,
}

impl SchedulingCoordinator {
    pub fn new(deps: Collaborators, locks: Arc<MentorLocks>, policy: SchedulingPolicy) -> Self {
        Self { deps, locks, policy }
    }

    pub fn policy(&self) -> &SchedulingPolicy {
        &self.policy
    }

    // ── Availability ─────────────────────────────────────────

    pub async fn list_windows(&self, mentor_id: Uuid) -> SchedulingResult<Vec<AvailabilityWindow>> {
        self.mentor(mentor_id).await?;
        self.deps.availability.list_windows(mentor_id).await
    }

    /// Validates and stores the mentor's complete window set.
    pub async fn update_availability(
        &self,
        mentor_id: Uuid,
        inputs: &[WindowInput],
    ) -> SchedulingResult<Vec<AvailabilityWindow>> {
        self.mentor(mentor_id).await?;
        let windows = normalize_windows(inputs)?;

        let _guard = self.locks.acquire(mentor_id).await;
        let stored = self
            .deps
            .availability
            .replace_windows(mentor_id, windows)
            .await?;
        info!(
            "Availability updated: mentor_id={}, windows={}",
            mentor_id,
            stored.len()
        );
        Ok(stored)
    }

    /// Bookable slot start times for `date`.
    ///
    /// With `duration`, every returned slot can be reserved for that many
    /// minutes; without it, only the next granularity step is guaranteed.
    pub async fn list_availability(
        &self,
        mentor_id: Uuid,
        date: &str,
        duration: Option<u32>,
    ) -> SchedulingResult<Vec<WallTime>> {
        let date = parse_date("date", date)?;
        if let Some(duration) = duration {
            self.check_duration(duration)?;
        }
        self.verified_mentor(mentor_id).await?;

        let windows = self.deps.availability.list_windows(mentor_id).await?;
        let bookings = self.deps.bookings.list_for_mentor(mentor_id).await?;
        let slots = generate_slots(
            &windows,
            &bookings,
            date,
            self.policy.granularity_minutes,
            duration,
        );
        debug!(
            "Availability listed: mentor_id={}, date={}, slots={}",
            mentor_id,
            date,
            slots.len()
        );
        Ok(slots)
    }

    /// Whether `[scheduled_at, scheduled_at + duration)` overlaps an active
    /// booking of the mentor other than `exclude`.
    pub async fn has_conflict(
        &self,
        mentor_id: Uuid,
        scheduled_at: DateTime<Utc>,
        duration: u32,
        exclude: Option<Uuid>,
    ) -> SchedulingResult<bool> {
        let bookings = self.deps.bookings.list_for_mentor(mentor_id).await?;
        let range = TimeRange::starting_at(scheduled_at, duration);
        Ok(has_conflict(&bookings, &range, exclude))
    }

    // ── Reservation ──────────────────────────────────────────

    /// Reserves a slot, creating the booking in `pending`.
    pub async fn reserve(&self, request: &ReservationRequest) -> SchedulingResult<Booking> {
        let date = parse_date("date", &request.date)?;
        let start = WallTime::parse_field("startTime", &request.start_time)?;
        let end = WallTime::parse_field("endTime", &request.end_time)?;
        if start >= end {
            return Err(SchedulingError::validation(
                "endTime",
                "End time must be after start time",
            ));
        }
        if request.mentor_id == request.mentee_id {
            return Err(SchedulingError::validation(
                "mentorId",
                "You cannot book a session with yourself",
            ));
        }

        let mentor = self.verified_mentor(request.mentor_id).await?;
        self.deps
            .users
            .find_user(request.mentee_id)
            .await?
            .ok_or_else(|| {
                SchedulingError::NotFound(format!("Mentee with ID {} not found", request.mentee_id))
            })?;

        let now = self.deps.clock.now();
        let scheduled_at = start.on(date);
        if scheduled_at <= now {
            return Err(SchedulingError::validation(
                "startTime",
                "Booking must be scheduled in the future",
            ));
        }

        let guard = self.locks.acquire(mentor.id).await;
        let windows = self.deps.availability.list_windows(mentor.id).await?;
        let window = covering_window(&windows, date, start, end)
            .ok_or_else(|| {
                SchedulingError::Conflict("Mentor is not available at the selected time".into())
            })?
            .id;
        let duration = end.minutes_since(start);

        if self
            .has_conflict(mentor.id, scheduled_at, duration, None)
            .await?
        {
            return Err(SchedulingError::Conflict(
                "The selected time slot is already booked".into(),
            ));
        }

        let booking = Booking::create(
            NewBooking {
                mentor_id: mentor.id,
                mentee_id: request.mentee_id,
                scheduled_at,
                duration,
                topic: request.topic.clone(),
                message: request.message.clone(),
                price: session_price(mentor.hourly_rate, duration),
                window,
            },
            now,
            &self.policy,
        )?;
        let booking = self.deps.bookings.reserve(booking).await?;
        drop(guard);

        info!(
            "Booking reserved: id={}, mentor_id={}, mentee_id={}, scheduled_at={}, duration={}",
            booking.id, booking.mentor_id, booking.mentee_id, booking.scheduled_at, booking.duration
        );
        self.notify(NotificationKind::Requested, &booking).await;
        Ok(booking)
    }

    // ── Lifecycle ────────────────────────────────────────────

    /// `pending → scheduled`, creating a meeting link first if none exists.
    pub async fn approve(&self, mentor_id: Uuid, booking_id: Uuid) -> SchedulingResult<Booking> {
        let (guard, mut booking) = self
            .locked_booking(mentor_id, booking_id, Some(Party::Mentor))
            .await?;
        if booking.status != BookingStatus::Pending {
            return Err(SchedulingError::illegal_transition("approve", booking.status));
        }

        let link = match booking.meeting_link {
            Some(_) => None,
            None => Some(self.create_meeting(&booking).await?),
        };
        booking.approve(link, self.deps.clock.now())?;
        let booking = self.deps.bookings.update(&booking).await?;
        drop(guard);

        info!("Booking approved: id={}, mentor_id={}", booking.id, mentor_id);
        self.notify(NotificationKind::Approved, &booking).await;
        Ok(booking)
    }

    /// Mentor turns down a pending request.
    pub async fn decline(
        &self,
        mentor_id: Uuid,
        booking_id: Uuid,
        reason: &str,
    ) -> SchedulingResult<Booking> {
        let (guard, mut booking) = self
            .locked_booking(mentor_id, booking_id, Some(Party::Mentor))
            .await?;
        booking.decline(reason, self.deps.clock.now())?;
        let booking = self.deps.bookings.update(&booking).await?;
        drop(guard);

        info!("Booking declined: id={}, mentor_id={}", booking.id, mentor_id);
        self.notify(NotificationKind::Declined, &booking).await;
        Ok(booking)
    }

    /// Either participant cancels a scheduled booking.
    pub async fn cancel(
        &self,
        actor_id: Uuid,
        booking_id: Uuid,
        reason: &str,
    ) -> SchedulingResult<Booking> {
        let (guard, mut booking) = self.locked_booking(actor_id, booking_id, None).await?;
        let party = booking
            .party_of(actor_id)
            .ok_or_else(|| SchedulingError::booking_not_found(booking_id))?;
        booking.cancel(party, reason, self.deps.clock.now(), &self.policy)?;
        let booking = self.deps.bookings.update(&booking).await?;
        drop(guard);

        info!(
            "Booking cancelled: id={}, by={:?}, actor_id={}",
            booking.id, party, actor_id
        );
        self.notify(NotificationKind::Cancelled, &booking).await;
        Ok(booking)
    }

    /// `scheduled → completed`; bumps the mentor's session counter.
    pub async fn complete(
        &self,
        mentor_id: Uuid,
        booking_id: Uuid,
        notes: Option<&str>,
    ) -> SchedulingResult<Booking> {
        let (guard, mut booking) = self
            .locked_booking(mentor_id, booking_id, Some(Party::Mentor))
            .await?;
        let original = booking.clone();
        booking.complete(notes, self.deps.clock.now())?;
        let booking = self.deps.bookings.update(&booking).await?;
        let mentor = match self.deps.mentors.record_completed_session(mentor_id).await {
            Ok(mentor) => mentor,
            Err(err) => return Err(self.restore(&original, err).await),
        };
        drop(guard);

        info!(
            "Booking completed: id={}, mentor_id={}, total_sessions={}",
            booking.id, mentor_id, mentor.total_sessions
        );
        self.notify(NotificationKind::Completed, &booking).await;
        Ok(booking)
    }

    pub async fn mark_no_show(&self, mentor_id: Uuid, booking_id: Uuid) -> SchedulingResult<Booking> {
        let (guard, mut booking) = self
            .locked_booking(mentor_id, booking_id, Some(Party::Mentor))
            .await?;
        booking.mark_no_show(self.deps.clock.now())?;
        let booking = self.deps.bookings.update(&booking).await?;
        drop(guard);

        info!("Booking marked no-show: id={}, mentor_id={}", booking.id, mentor_id);
        self.notify(NotificationKind::NoShow, &booking).await;
        Ok(booking)
    }

    /// Mentee rates a completed session once; the mentor's aggregate rating
    /// is recomputed from all rated completed bookings.
    pub async fn submit_feedback(
        &self,
        mentee_id: Uuid,
        booking_id: Uuid,
        rating: i64,
        comment: Option<&str>,
    ) -> SchedulingResult<()> {
        let (guard, mut booking) = self
            .locked_booking(mentee_id, booking_id, Some(Party::Mentee))
            .await?;
        let original = booking.clone();
        booking.add_feedback(rating, comment, self.deps.clock.now())?;
        let booking = self.deps.bookings.update(&booking).await?;

        let (average, reviews) = match self.recompute_rating(booking.mentor_id).await {
            Ok(aggregate) => aggregate,
            Err(err) => return Err(self.restore(&original, err).await),
        };
        drop(guard);

        info!(
            "Feedback recorded: booking_id={}, mentor_id={}, rating={:.2}, reviews={}",
            booking.id, booking.mentor_id, average, reviews
        );
        self.notify(NotificationKind::FeedbackReceived, &booking).await;
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────

    /// A booking visible to one of its participants.
    pub async fn get_booking(&self, actor_id: Uuid, booking_id: Uuid) -> SchedulingResult<Booking> {
        self.participant_booking(actor_id, booking_id, None).await
    }

    /// Bookings where `actor_id` takes part, ordered by start time.
    pub async fn list_bookings(
        &self,
        actor_id: Uuid,
        filter: BookingFilter,
    ) -> SchedulingResult<Vec<Booking>> {
        let mut found: HashMap<Uuid, Booking> = HashMap::new();
        if filter.role != Some(Party::Mentee) {
            for booking in self.deps.bookings.list_for_mentor(actor_id).await? {
                found.insert(booking.id, booking);
            }
        }
        if filter.role != Some(Party::Mentor) {
            for booking in self.deps.bookings.list_for_mentee(actor_id).await? {
                found.insert(booking.id, booking);
            }
        }

        let mut bookings: Vec<Booking> = found
            .into_values()
            .filter(|b| filter.status.is_none_or(|status| b.status == status))
            .collect();
        bookings.sort_by_key(|b| (b.scheduled_at, b.created_at));
        Ok(bookings)
    }

    // ── Helpers ──────────────────────────────────────────────

    async fn mentor(&self, mentor_id: Uuid) -> SchedulingResult<MentorProfile> {
        self.deps
            .mentors
            .find_mentor(mentor_id)
            .await?
            .ok_or_else(|| SchedulingError::mentor_not_found(mentor_id))
    }

    async fn verified_mentor(&self, mentor_id: Uuid) -> SchedulingResult<MentorProfile> {
        let mentor = self.mentor(mentor_id).await?;
        if !mentor.is_verified {
            return Err(SchedulingError::mentor_not_found(mentor_id));
        }
        Ok(mentor)
    }

    fn check_duration(&self, duration: u32) -> SchedulingResult<()> {
        if duration < self.policy.min_duration_minutes {
            return Err(SchedulingError::validation(
                "duration",
                format!(
                    "Session must last at least {} minutes",
                    self.policy.min_duration_minutes
                ),
            ));
        }
        if duration > MINUTES_PER_DAY {
            return Err(SchedulingError::validation(
                "duration",
                format!("Session cannot last longer than {} minutes", MINUTES_PER_DAY),
            ));
        }
        Ok(())
    }

    async fn recompute_rating(&self, mentor_id: Uuid) -> SchedulingResult<(f64, u32)> {
        let history = self.deps.bookings.list_for_mentor(mentor_id).await?;
        let (average, reviews) = aggregate_rating(&history);
        self.deps
            .mentors
            .update_rating(mentor_id, average, reviews)
            .await?;
        Ok((average, reviews))
    }

    /// Puts `original` back after a follow-up write failed, so the caller
    /// can retry the whole transition. Returns the error that caused it.
    async fn restore(&self, original: &Booking, cause: SchedulingError) -> SchedulingError {
        warn!(
            "Rolling back booking: id={}, status={}, error={}",
            original.id, original.status, cause
        );
        if let Err(err) = self.deps.bookings.update(original).await {
            warn!("Rollback failed: booking_id={}, error={}", original.id, err);
        }
        cause
    }

    /// Loads a booking `actor_id` takes part in. With `role`, the actor must
    /// be on that side; anything else reads as not found.
    async fn participant_booking(
        &self,
        actor_id: Uuid,
        booking_id: Uuid,
        role: Option<Party>,
    ) -> SchedulingResult<Booking> {
        let booking = self
            .deps
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| SchedulingError::booking_not_found(booking_id))?;
        match (booking.party_of(actor_id), role) {
            (None, _) => Err(SchedulingError::booking_not_found(booking_id)),
            (Some(party), Some(required)) if party != required => {
                Err(SchedulingError::booking_not_found(booking_id))
            }
            _ => Ok(booking),
        }
    }

    /// Like [`Self::participant_booking`], but returns the booking re-read
    /// while holding its mentor's lock.
    async fn locked_booking(
        &self,
        actor_id: Uuid,
        booking_id: Uuid,
        role: Option<Party>,
    ) -> SchedulingResult<(MentorGuard, Booking)> {
        let mentor_id = self
            .participant_booking(actor_id, booking_id, role)
            .await?
            .mentor_id;
        let guard = self.locks.acquire(mentor_id).await;
        let booking = self.participant_booking(actor_id, booking_id, role).await?;
        Ok((guard, booking))
    }

    async fn create_meeting(&self, booking: &Booking) -> SchedulingResult<MeetingLink> {
        let mut attendee_emails = Vec::with_capacity(2);
        if let Some(mentor) = self.deps.mentors.find_mentor(booking.mentor_id).await? {
            attendee_emails.push(mentor.email);
        }
        if let Some(mentee) = self.deps.users.find_user(booking.mentee_id).await? {
            attendee_emails.push(mentee.email);
        }

        let request = MeetingRequest {
            topic: booking.topic.clone(),
            start: booking.scheduled_at,
            duration_minutes: booking.duration,
            attendee_emails,
        };
        self.deps
            .meetings
            .create_meeting(&request)
            .await
            .map_err(|err| match err {
                upstream @ SchedulingError::Upstream { .. } => upstream,
                other => SchedulingError::Upstream {
                    service: MEETING_SERVICE,
                    message: other.to_string(),
                },
            })
            .inspect_err(|err| {
                warn!("Meeting creation failed: booking_id={}, error={}", booking.id, err)
            })
    }

    async fn notify(&self, kind: NotificationKind, booking: &Booking) {
        let notification = BookingNotification {
            kind,
            booking: booking.clone(),
        };
        if let Err(err) = self.deps.notifications.notify(&notification).await {
            warn!(
                "Notification delivery failed: booking_id={}, kind={:?}, error={:#}",
                booking.id, kind, err
            );
        }
    }
}

/// `hourly_rate × minutes / 60`, rounded to cents.
pub fn session_price(hourly_rate: f64, minutes: u32) -> f64 {
    (hourly_rate * f64::from(minutes) / 60.0 * 100.0).round() / 100.0
}
