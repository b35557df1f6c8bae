use async_trait::async_trait;
use mentorsync_core::ports::{BookingNotification, NotificationGateway};
use tracing::info;

/// Writes every booking notification to the log.
///
/// Stands in for email or push delivery; the coordinator already treats
/// delivery as fire-and-forget.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationGateway;

#[async_trait]
impl NotificationGateway for TracingNotificationGateway {
    async fn notify(&self, notification: &BookingNotification) -> eyre::Result<()> {
        let booking = &notification.booking;
        info!(
            "Notification: kind={:?}, booking_id={}, mentor_id={}, mentee_id={}, status={}, scheduled_at={}",
            notification.kind,
            booking.id,
            booking.mentor_id,
            booking.mentee_id,
            booking.status,
            booking.scheduled_at
        );
        Ok(())
    }
}
