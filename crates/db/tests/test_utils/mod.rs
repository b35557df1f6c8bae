#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use mentorsync_core::{
    clock::FixedClock,
    coordinator::{Collaborators, SchedulingCoordinator},
    locks::MentorLocks,
    models::{
        availability::WindowInput,
        booking::{Booking, MeetingLink},
        mentor::{MentorProfile, UserContact},
        requests::ReservationRequest,
    },
    ports::{AvailabilityStore, BookingStore, MentorDirectory, NotificationGateway},
    scheduling::SchedulingPolicy,
};
use mentorsync_db::{
    mock::collaborators::{MockMeetingLinks, MockNotifications},
    InMemoryStore,
};

/// Monday 2024-01-01 00:00 UTC, one week before the scenario date.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn meeting_link() -> MeetingLink {
    MeetingLink {
        join_url: "https://meet.example.com/j/42".to_string(),
        external_id: "42".to_string(),
    }
}

pub fn permissive_meetings() -> MockMeetingLinks {
    let mut meetings = MockMeetingLinks::new();
    meetings
        .expect_create_meeting()
        .returning(|_| Ok(meeting_link()));
    meetings
}

pub fn permissive_notifications() -> MockNotifications {
    let mut notifications = MockNotifications::new();
    notifications.expect_notify().returning(|_| Ok(()));
    notifications
}

pub struct TestContext {
    pub store: InMemoryStore,
    pub clock: Arc<FixedClock>,
    pub coordinator: Arc<SchedulingCoordinator>,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
}

pub struct TestContextBuilder {
    store: InMemoryStore,
    meetings: MockMeetingLinks,
    notifications: Arc<dyn NotificationGateway>,
    availability: Option<Arc<dyn AvailabilityStore>>,
    bookings: Option<Arc<dyn BookingStore>>,
    mentors: Option<Arc<dyn MentorDirectory>>,
}

impl TestContextBuilder {
    pub fn meetings(mut self, meetings: MockMeetingLinks) -> Self {
        self.meetings = meetings;
        self
    }

    pub fn notifications(mut self, notifications: impl NotificationGateway + 'static) -> Self {
        self.notifications = Arc::new(notifications);
        self
    }

    pub fn availability(mut self, availability: Arc<dyn AvailabilityStore>) -> Self {
        self.availability = Some(availability);
        self
    }

    pub fn bookings(mut self, bookings: Arc<dyn BookingStore>) -> Self {
        self.bookings = Some(bookings);
        self
    }

    pub fn mentors(mut self, mentors: impl MentorDirectory + 'static) -> Self {
        self.mentors = Some(Arc::new(mentors));
        self
    }

    pub fn build(self) -> TestContext {
        let store = self.store;
        let mentor_id = Uuid::new_v4();
        let mentee_id = Uuid::new_v4();
        store.add_mentor(MentorProfile::new(
            mentor_id,
            "Grace Mentor",
            "grace@example.com",
            60.0,
        ));
        store.add_user(UserContact {
            id: mentee_id,
            display_name: "Ada Mentee".to_string(),
            email: "ada@example.com".to_string(),
        });

        let clock = Arc::new(FixedClock::new(epoch()));
        let deps = Collaborators {
            availability: self
                .availability
                .unwrap_or_else(|| store.availability.clone()),
            bookings: self.bookings.unwrap_or_else(|| store.bookings.clone()),
            mentors: self.mentors.unwrap_or_else(|| store.mentors.clone()),
            users: store.users.clone(),
            meetings: Arc::new(self.meetings),
            notifications: self.notifications,
            clock: clock.clone(),
        };
        let coordinator = Arc::new(SchedulingCoordinator::new(
            deps,
            Arc::new(MentorLocks::new()),
            SchedulingPolicy::default(),
        ));

        TestContext {
            store,
            clock,
            coordinator,
            mentor_id,
            mentee_id,
        }
    }
}

impl TestContext {
    pub fn builder() -> TestContextBuilder {
        TestContextBuilder {
            store: InMemoryStore::new(),
            meetings: permissive_meetings(),
            notifications: Arc::new(permissive_notifications()),
            availability: None,
            bookings: None,
            mentors: None,
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Registers another mentee and returns their id.
    pub fn add_mentee(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.store.add_user(UserContact {
            id,
            display_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        });
        id
    }

    /// Recurring Monday 09:00–11:00.
    pub async fn with_monday_morning(&self) {
        self.coordinator
            .update_availability(self.mentor_id, &[WindowInput::recurring(1, "09:00", "11:00")])
            .await
            .unwrap();
    }

    pub fn request(&self, date: &str, start: &str, end: &str) -> ReservationRequest {
        ReservationRequest {
            mentor_id: self.mentor_id,
            mentee_id: self.mentee_id,
            date: date.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            topic: "Rust ownership".to_string(),
            message: None,
        }
    }

    pub async fn slots(&self, date: &str) -> Vec<String> {
        self.coordinator
            .list_availability(self.mentor_id, date, None)
            .await
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Reserves `start`–`end` on 2024-01-08 and approves it.
    pub async fn scheduled_booking(&self, start: &str, end: &str) -> Booking {
        let booking = self
            .coordinator
            .reserve(&self.request("2024-01-08", start, end))
            .await
            .unwrap();
        self.coordinator
            .approve(self.mentor_id, booking.id)
            .await
            .unwrap()
    }
}
