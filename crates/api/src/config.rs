//! # API Configuration Module
//!
//! Loads the server configuration from environment variables, with defaults
//! for everything except the optional integrations.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: host address to bind to (default: "0.0.0.0")
//! - `API_PORT`: port to listen on (default: 3000)
//! - `LOG_LEVEL`: logging level (default: "info")
//! - `API_CORS_ORIGINS`: comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: per-request timeout (default: 30)
//! - `SLOT_GRANULARITY_MINUTES`: step between offered slot starts (default: 30)
//! - `MEETING_PROVIDER_URL`: base URL of the video-meeting service; local
//!   placeholder links are issued when unset
//! - `MEETING_PROVIDER_TOKEN`: bearer token for the meeting service
//! - `SEED_FILE`: JSON file of mentors and users to preload

use std::env;
use std::path::PathBuf;

use eyre::{bail, Result, WrapErr};
use mentorsync_core::scheduling::SchedulingPolicy;
use tracing::Level;

/// Configuration for the MentorSync API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use mentorsync_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Minutes between consecutive slot starts
    pub slot_granularity: u32,

    pub meeting_provider_url: Option<String>,
    pub meeting_provider_token: Option<String>,

    /// Mentors and users to load at startup
    pub seed_file: Option<PathBuf>,
}

impl ApiConfig {
    /// Creates a new ApiConfig from the process environment
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - SLOT_GRANULARITY_MINUTES is not a positive number of minutes
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, `from_env` being the
    /// process-environment case.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        // Network settings
        let host = var("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Logging settings
        let log_level = match var("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = var("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = var("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);

        // Scheduling settings
        let slot_granularity = match var("SLOT_GRANULARITY_MINUTES") {
            Some(value) => value
                .parse()
                .wrap_err("Invalid SLOT_GRANULARITY_MINUTES value")?,
            None => SchedulingPolicy::default().granularity_minutes,
        };
        if slot_granularity == 0 {
            bail!("SLOT_GRANULARITY_MINUTES must be at least 1");
        }

        // Integrations
        let meeting_provider_url = var("MEETING_PROVIDER_URL");
        let meeting_provider_token = var("MEETING_PROVIDER_TOKEN");
        let seed_file = var("SEED_FILE").map(PathBuf::from);

        Ok(Self {
            host,
            port,
            log_level,
            cors_origins,
            request_timeout,
            slot_granularity,
            meeting_provider_url,
            meeting_provider_token,
            seed_file,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Scheduling rules with the configured slot granularity.
    pub fn policy(&self) -> SchedulingPolicy {
        SchedulingPolicy {
            granularity_minutes: self.slot_granularity,
            ..SchedulingPolicy::default()
        }
    }
}
