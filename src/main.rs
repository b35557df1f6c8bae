use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use mentorsync_api::{config::ApiConfig, notifications::TracingNotificationGateway, ApiState};
use mentorsync_core::{
    clock::SystemClock,
    coordinator::{Collaborators, SchedulingCoordinator},
    locks::MentorLocks,
};
use mentorsync_db::InMemoryStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration and logging
    let config = ApiConfig::from_env()?;
    mentorsync_api::init_tracing(&config)?;

    // In-memory stores, optionally seeded with mentors and users
    let store = InMemoryStore::new();
    if let Some(path) = &config.seed_file {
        store.load_seed(path)?;
    }

    let deps = Collaborators {
        availability: store.availability.clone(),
        bookings: store.bookings.clone(),
        mentors: store.mentors.clone(),
        users: store.users.clone(),
        meetings: mentorsync_api::meeting_provider(&config),
        notifications: Arc::new(TracingNotificationGateway),
        clock: Arc::new(SystemClock),
    };
    let coordinator = SchedulingCoordinator::new(deps, Arc::new(MentorLocks::new()), config.policy());

    tracing::info!(
        "Starting mentorsync: slot_granularity={}min, seed_file={:?}",
        config.slot_granularity,
        config.seed_file
    );

    // Start API server
    mentorsync_api::start_server(config, ApiState::new(Arc::new(coordinator))).await?;

    Ok(())
}
