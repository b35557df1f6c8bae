use async_trait::async_trait;
use mockall::mock;
use uuid::Uuid;

use mentorsync_core::{
    errors::SchedulingResult,
    models::{availability::AvailabilityWindow, booking::Booking, mentor::MentorProfile},
    ports::{AvailabilityStore, BookingStore, MentorDirectory},
};

// Mock stores for failure injection in tests
mock! {
    pub AvailabilityRepo {}

    #[async_trait]
    impl AvailabilityStore for AvailabilityRepo {
        async fn list_windows(&self, mentor_id: Uuid) -> SchedulingResult<Vec<AvailabilityWindow>>;

        async fn replace_windows(
            &self,
            mentor_id: Uuid,
            windows: Vec<AvailabilityWindow>,
        ) -> SchedulingResult<Vec<AvailabilityWindow>>;
    }
}

mock! {
    pub BookingRepo {}

    #[async_trait]
    impl BookingStore for BookingRepo {
        async fn find_by_id(&self, id: Uuid) -> SchedulingResult<Option<Booking>>;

        async fn list_for_mentor(&self, mentor_id: Uuid) -> SchedulingResult<Vec<Booking>>;

        async fn list_for_mentee(&self, mentee_id: Uuid) -> SchedulingResult<Vec<Booking>>;

        async fn reserve(&self, booking: Booking) -> SchedulingResult<Booking>;

        async fn update(&self, booking: &Booking) -> SchedulingResult<Booking>;
    }
}

mock! {
    pub MentorRepo {}

    #[async_trait]
    impl MentorDirectory for MentorRepo {
        async fn find_mentor(&self, mentor_id: Uuid) -> SchedulingResult<Option<MentorProfile>>;

        async fn record_completed_session(&self, mentor_id: Uuid) -> SchedulingResult<MentorProfile>;

        async fn update_rating(
            &self,
            mentor_id: Uuid,
            rating: f64,
            review_count: u32,
        ) -> SchedulingResult<MentorProfile>;
    }
}
