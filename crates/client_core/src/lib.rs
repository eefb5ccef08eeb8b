use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use shared::{
    domain::Roster,
    error::ErrorBody,
    protocol::{ParticipantQuery, SignupResponse, UnregisterResponse},
};
use tracing::{debug, warn};
use url::Url;

pub mod app;
pub mod error;
pub mod mutation;
pub mod notification;
pub mod page;
mod templates;
pub mod view;

pub use app::{AppController, AppPhase, EventOutcome, PageEvent};
pub use error::{ClientError, ClientErrorKind};
pub use mutation::{MutationController, MutationOutcome};
pub use notification::{NotificationKind, NotificationService, NotificationState};
pub use page::Page;
pub use view::{render, RenderedRoster};

const ACTIVITIES_SEGMENT: &str = "activities";
const SIGNUP_SEGMENT: &str = "signup";
const UNREGISTER_SEGMENT: &str = "unregister";

/// Remote roster endpoints. One call is one network round trip; nothing is
/// retried or cached.
#[async_trait]
pub trait RosterApi: Send + Sync {
    async fn fetch_roster(&self) -> Result<Roster, ClientError>;
    /// Returns the server's confirmation message.
    async fn signup(&self, activity: &str, participant: &str) -> Result<String, ClientError>;
    /// Returns the server's confirmation message when it sent one.
    async fn unregister(
        &self,
        activity: &str,
        participant: &str,
    ) -> Result<Option<String>, ClientError>;
}

pub struct HttpRosterApi {
    http: Client,
    base_url: Url,
}

impl HttpRosterApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ClientError::transport("client setup", source))?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base url.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(
        &self,
        request: RequestBuilder,
        label: &str,
    ) -> Result<(StatusCode, Vec<u8>), ClientError> {
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::transport(label, source))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| ClientError::transport(label, source))?;
        debug!(endpoint = label, status = status.as_u16(), "roster api response");
        Ok((status, body.to_vec()))
    }

    fn rejection(label: &str, status: StatusCode, body: &[u8]) -> ClientError {
        let detail = ErrorBody::from_body(body);
        warn!(
            endpoint = label,
            status = status.as_u16(),
            detail = detail.as_deref().unwrap_or(""),
            "roster api rejected request"
        );
        ClientError::Rejected {
            endpoint: label.to_string(),
            status: status.as_u16(),
            detail,
        }
    }
}

#[async_trait]
impl RosterApi for HttpRosterApi {
    async fn fetch_roster(&self) -> Result<Roster, ClientError> {
        let label = "GET /activities";
        let url = self.endpoint(&[ACTIVITIES_SEGMENT]);
        let (status, body) = self.send(self.http.get(url), label).await?;
        if !status.is_success() {
            return Err(Self::rejection(label, status, &body));
        }
        let roster: Roster =
            serde_json::from_slice(&body).map_err(|source| ClientError::decode(label, source))?;
        debug!(activities = roster.len(), "decoded roster snapshot");
        Ok(roster)
    }

    async fn signup(&self, activity: &str, participant: &str) -> Result<String, ClientError> {
        let label = "POST /activities/{name}/signup";
        let url = self.endpoint(&[ACTIVITIES_SEGMENT, activity, SIGNUP_SEGMENT]);
        let request = self.http.post(url).query(&ParticipantQuery {
            email: participant.to_string(),
        });
        let (status, body) = self.send(request, label).await?;
        if !status.is_success() {
            return Err(Self::rejection(label, status, &body));
        }
        let response: SignupResponse =
            serde_json::from_slice(&body).map_err(|source| ClientError::decode(label, source))?;
        Ok(response.message)
    }

    async fn unregister(
        &self,
        activity: &str,
        participant: &str,
    ) -> Result<Option<String>, ClientError> {
        let label = "DELETE /activities/{name}/unregister";
        let url = self.endpoint(&[ACTIVITIES_SEGMENT, activity, UNREGISTER_SEGMENT]);
        let request = self.http.delete(url).query(&ParticipantQuery {
            email: participant.to_string(),
        });
        let (status, body) = self.send(request, label).await?;
        if !status.is_success() {
            return Err(Self::rejection(label, status, &body));
        }
        // Any success body is accepted; a message is only picked up when present.
        Ok(serde_json::from_slice::<UnregisterResponse>(&body)
            .ok()
            .and_then(|response| response.message))
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
