use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use eyre::eyre;
use mentorsync_core::{
    errors::{SchedulingError, SchedulingResult},
    models::booking::Booking,
    ports::BookingStore,
    scheduling::conflict::find_conflict,
};
use tokio::sync::RwLock;
use uuid::Uuid;

type Partition = Arc<RwLock<Vec<Booking>>>;

/// Bookings partitioned by mentor.
///
/// Each mentor's bookings sit behind their own lock, so the overlap check in
/// [`BookingStore::reserve`] and the insert that follows it are one atomic
/// step per mentor, the in-memory stand-in for a uniqueness constraint.
#[derive(Debug, Default)]
pub struct InMemoryBookingStore {
    partitions: DashMap<Uuid, Partition>,
    /// booking id → mentor id
    owners: DashMap<Uuid, Uuid>,
    /// mentee id → booking ids
    by_mentee: DashMap<Uuid, Vec<Uuid>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn partition(&self, mentor_id: Uuid) -> Partition {
        self.partitions.entry(mentor_id).or_default().clone()
    }

    fn existing_partition(&self, mentor_id: &Uuid) -> Option<Partition> {
        self.partitions.get(mentor_id).map(|e| e.value().clone())
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

fn sorted(mut bookings: Vec<Booking>) -> Vec<Booking> {
    bookings.sort_by_key(|b| (b.scheduled_at, b.created_at));
    bookings
}

fn slot_taken() -> SchedulingError {
    SchedulingError::Conflict("The selected time slot is already booked".into())
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn find_by_id(&self, id: Uuid) -> SchedulingResult<Option<Booking>> {
        let Some(mentor_id) = self.owners.get(&id).map(|e| *e.value()) else {
            return Ok(None);
        };
        let Some(partition) = self.existing_partition(&mentor_id) else {
            return Ok(None);
        };
        let bookings = partition.read().await;
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn list_for_mentor(&self, mentor_id: Uuid) -> SchedulingResult<Vec<Booking>> {
        let Some(partition) = self.existing_partition(&mentor_id) else {
            return Ok(Vec::new());
        };
        let bookings = partition.read().await.clone();
        Ok(sorted(bookings))
    }

    async fn list_for_mentee(&self, mentee_id: Uuid) -> SchedulingResult<Vec<Booking>> {
        let ids = self
            .by_mentee
            .get(&mentee_id)
            .map(|e| e.value().clone())
            .unwrap_or_default();

        let mut by_mentor: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for id in ids {
            if let Some(mentor_id) = self.owners.get(&id).map(|e| *e.value()) {
                by_mentor.entry(mentor_id).or_default().push(id);
            }
        }

        let mut found = Vec::new();
        for (mentor_id, ids) in by_mentor {
            if let Some(partition) = self.existing_partition(&mentor_id) {
                let bookings = partition.read().await;
                found.extend(bookings.iter().filter(|b| ids.contains(&b.id)).cloned());
            }
        }
        Ok(sorted(found))
    }

    async fn reserve(&self, booking: Booking) -> SchedulingResult<Booking> {
        let partition = self.partition(booking.mentor_id);
        let mut bookings = partition.write().await;

        if bookings.iter().any(|b| b.id == booking.id) {
            return Err(eyre!("booking {} already exists", booking.id).into());
        }
        if booking.status.is_active()
            && let Some(existing) = find_conflict(&bookings, &booking.time_range(), None)
        {
            tracing::debug!(
                "Reservation rejected: mentor_id={}, overlaps booking {}",
                booking.mentor_id,
                existing.id
            );
            return Err(slot_taken());
        }

        bookings.push(booking.clone());
        self.owners.insert(booking.id, booking.mentor_id);
        self.by_mentee
            .entry(booking.mentee_id)
            .or_default()
            .push(booking.id);
        tracing::debug!(
            "Booking stored: id={}, mentor_id={}",
            booking.id,
            booking.mentor_id
        );
        Ok(booking)
    }

    async fn update(&self, booking: &Booking) -> SchedulingResult<Booking> {
        let owner = self.owners.get(&booking.id).map(|e| *e.value());
        let partition = match owner {
            Some(mentor_id) if mentor_id == booking.mentor_id => {
                self.existing_partition(&mentor_id)
            }
            Some(_) => {
                return Err(eyre!("booking {} cannot change mentor", booking.id).into());
            }
            None => None,
        }
        .ok_or_else(|| SchedulingError::booking_not_found(booking.id))?;

        let mut bookings = partition.write().await;
        if booking.status.is_active()
            && find_conflict(&bookings, &booking.time_range(), Some(booking.id)).is_some()
        {
            return Err(slot_taken());
        }
        let slot = bookings
            .iter_mut()
            .find(|b| b.id == booking.id)
            .ok_or_else(|| SchedulingError::booking_not_found(booking.id))?;
        *slot = booking.clone();
        Ok(booking.clone())
    }
}
