pub mod repositories;

pub mod mock;

use std::path::Path;
use std::sync::Arc;

use eyre::{Result, WrapErr};
use mentorsync_core::models::mentor::{MentorProfile, UserContact};
use serde::Deserialize;

use repositories::{
    availability::InMemoryAvailabilityStore,
    booking::InMemoryBookingStore,
    directory::{InMemoryMentorDirectory, InMemoryUserDirectory},
};

/// One set of in-memory backends, shared by handle.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    pub availability: Arc<InMemoryAvailabilityStore>,
    pub bookings: Arc<InMemoryBookingStore>,
    pub mentors: Arc<InMemoryMentorDirectory>,
    pub users: Arc<InMemoryUserDirectory>,
}

/// Mentor and user records to preload, since their CRUD lives elsewhere.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub mentors: Vec<MentorProfile>,
    #[serde(default)]
    pub users: Vec<UserContact>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mentor, who is also reachable as a user.
    pub fn add_mentor(&self, mentor: MentorProfile) {
        self.users.insert(UserContact {
            id: mentor.id,
            display_name: mentor.display_name.clone(),
            email: mentor.email.clone(),
        });
        self.mentors.insert(mentor);
    }

    pub fn add_user(&self, user: UserContact) {
        self.users.insert(user);
    }

    pub fn seed(&self, data: SeedData) {
        for user in data.users {
            self.add_user(user);
        }
        for mentor in data.mentors {
            self.add_mentor(mentor);
        }
    }

    pub fn load_seed(&self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read seed file {}", path.display()))?;
        let data: SeedData = serde_json::from_str(&raw)
            .wrap_err_with(|| format!("Invalid seed file {}", path.display()))?;
        tracing::info!(
            "Seeding store: mentors={}, users={}",
            data.mentors.len(),
            data.users.len()
        );
        self.seed(data);
        Ok(())
    }
}
