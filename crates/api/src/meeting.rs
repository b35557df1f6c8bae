//! Meeting-link providers.
//!
//! [`HttpMeetingLinkProvider`] talks to an external video-meeting service:
//!
//! ```text
//! POST {base_url}/meetings
//! Authorization: Bearer {token}
//! { "topic", "start", "durationMinutes", "attendeeEmails" }
//! → 2xx { "joinUrl", "externalId" }
//! ```
//!
//! [`LocalMeetingLinks`] issues placeholder links for deployments without one.

use async_trait::async_trait;
use mentorsync_core::{
    errors::{SchedulingError, SchedulingResult},
    models::booking::MeetingLink,
    ports::{MeetingLinkProvider, MeetingRequest},
};
use reqwest::Client;
use tracing::{debug, error};
use uuid::Uuid;

const SERVICE: &str = "meeting-link provider";

fn upstream(message: String) -> SchedulingError {
    error!("{}", message);
    SchedulingError::Upstream {
        service: SERVICE,
        message,
    }
}

pub struct HttpMeetingLinkProvider {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpMeetingLinkProvider {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }
}

#[async_trait]
impl MeetingLinkProvider for HttpMeetingLinkProvider {
    async fn create_meeting(&self, request: &MeetingRequest) -> SchedulingResult<MeetingLink> {
        let url = format!("{}/meetings", self.base_url);
        debug!("Creating meeting: url={}, start={}", url, request.start);

        let mut call = self.client.post(&url).json(request);
        if let Some(token) = &self.token {
            call = call.bearer_auth(token);
        }

        let res = call
            .send()
            .await
            .map_err(|e| upstream(format!("Meeting service connection error: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(upstream(format!(
                "Meeting service failed. Status: {}, Body: {}",
                status, text
            )));
        }

        res.json::<MeetingLink>()
            .await
            .map_err(|e| upstream(format!("Meeting service returned an invalid body: {}", e)))
    }
}

/// Hands out `{base_url}/{uuid}` links without calling anything.
#[derive(Debug, Clone)]
pub struct LocalMeetingLinks {
    base_url: String,
}

impl LocalMeetingLinks {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for LocalMeetingLinks {
    fn default() -> Self {
        Self::new("https://meet.mentorsync.local")
    }
}

#[async_trait]
impl MeetingLinkProvider for LocalMeetingLinks {
    async fn create_meeting(&self, _request: &MeetingRequest) -> SchedulingResult<MeetingLink> {
        let id = Uuid::new_v4().simple().to_string();
        Ok(MeetingLink {
            join_url: format!("{}/{}", self.base_url, id),
            external_id: id,
        })
    }
}
