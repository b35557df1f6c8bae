use async_trait::async_trait;
use dashmap::DashMap;
use mentorsync_core::{
    errors::SchedulingResult, models::availability::AvailabilityWindow, ports::AvailabilityStore,
};
use uuid::Uuid;

/// Window sets keyed by mentor. A replace swaps the whole set at once.
#[derive(Debug, Default)]
pub struct InMemoryAvailabilityStore {
    windows: DashMap<Uuid, Vec<AvailabilityWindow>>,
}

impl InMemoryAvailabilityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AvailabilityStore for InMemoryAvailabilityStore {
    async fn list_windows(&self, mentor_id: Uuid) -> SchedulingResult<Vec<AvailabilityWindow>> {
        tracing::debug!("Listing availability windows: mentor_id={}", mentor_id);
        Ok(self
            .windows
            .get(&mentor_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn replace_windows(
        &self,
        mentor_id: Uuid,
        windows: Vec<AvailabilityWindow>,
    ) -> SchedulingResult<Vec<AvailabilityWindow>> {
        tracing::debug!(
            "Replacing availability windows: mentor_id={}, count={}",
            mentor_id,
            windows.len()
        );
        if windows.is_empty() {
            self.windows.remove(&mentor_id);
        } else {
            self.windows.insert(mentor_id, windows.clone());
        }
        Ok(windows)
    }
}
