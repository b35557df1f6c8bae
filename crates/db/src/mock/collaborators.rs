use async_trait::async_trait;
use mockall::mock;

use mentorsync_core::{
    errors::SchedulingResult,
    models::booking::MeetingLink,
    ports::{BookingNotification, MeetingLinkProvider, MeetingRequest, NotificationGateway},
};

// Mock external collaborators
mock! {
    pub MeetingLinks {}

    #[async_trait]
    impl MeetingLinkProvider for MeetingLinks {
        async fn create_meeting(&self, request: &MeetingRequest) -> SchedulingResult<MeetingLink>;
    }
}

mock! {
    pub Notifications {}

    #[async_trait]
    impl NotificationGateway for Notifications {
        async fn notify(&self, notification: &BookingNotification) -> eyre::Result<()>;
    }
}
