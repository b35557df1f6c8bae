//! # MentorSync API
//!
//! The HTTP binding for the MentorSync scheduling engine. Every endpoint is a
//! thin wrapper over one [`SchedulingCoordinator`] operation.
//!
//! ## Architecture
//!
//! - **Routes**: API endpoints and URL structure
//! - **Handlers**: request parsing and response shaping
//! - **Middleware**: actor identity and error mapping
//! - **Config**: environment configuration
//! - **Meeting / Notifications**: production implementations of the outbound ports
//!
//! The API uses Axum as the web framework.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Meeting-link providers
pub mod meeting;
/// Actor extraction and error handling
pub mod middleware;
/// Notification delivery
pub mod notifications;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, Router};
use eyre::{Result, WrapErr};
use mentorsync_core::{coordinator::SchedulingCoordinator, ports::MeetingLinkProvider};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::config::ApiConfig;
use crate::meeting::{HttpMeetingLinkProvider, LocalMeetingLinks};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub coordinator: Arc<SchedulingCoordinator>,
}

impl ApiState {
    pub fn new(coordinator: Arc<SchedulingCoordinator>) -> Arc<Self> {
        Arc::new(Self { coordinator })
    }
}

/// Every route, with state attached and no server-level layers.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Mentor availability endpoints
        .merge(routes::availability::routes())
        // Booking endpoints
        .merge(routes::booking::routes())
        .with_state(state)
}

/// The meeting-link provider the configuration asks for.
pub fn meeting_provider(config: &ApiConfig) -> Arc<dyn MeetingLinkProvider> {
    match &config.meeting_provider_url {
        Some(url) => {
            info!("Meeting links from {}", url);
            Arc::new(HttpMeetingLinkProvider::new(
                url.clone(),
                config.meeting_provider_token.clone(),
            ))
        }
        None => {
            info!("MEETING_PROVIDER_URL not set, issuing local meeting links");
            Arc::new(LocalMeetingLinks::default())
        }
    }
}

/// Installs the global tracing subscriber at the configured level.
pub fn init_tracing(config: &ApiConfig) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            middleware::auth::ACTOR_HEADER.clone(),
        ])
        .allow_origin(origins)
        .allow_credentials(true))
}

/// Starts the API server with the provided configuration and state
///
/// Expects [`init_tracing`] to have run already.
pub async fn start_server(config: ApiConfig, state: Arc<ApiState>) -> Result<()> {
    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Request tracing and timeout
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
