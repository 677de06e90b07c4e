//! reqwest-backed implementation of `RemoteMeetingBackend`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use schoolhub_core::RemoteMeetingBackend;
use schoolhub_domain::constants::MEETINGS_API_PATH;
use schoolhub_domain::{Meeting, RemoteConfig, Result, SchoolHubError};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use super::errors::ApiError;
use crate::http::{HttpClient, RetryPolicy};

/// Remote meetings backend over HTTP
#[derive(Debug, Clone)]
pub struct HttpMeetingBackend {
    http: HttpClient,
    endpoint: Url,
    deadline: Duration,
}

impl HttpMeetingBackend {
    /// Create a backend rooted at `base_url`.
    ///
    /// `deadline` bounds a whole call including retries.
    ///
    /// # Errors
    /// Returns `Config` when `base_url` is not an absolute http(s) URL.
    pub fn new(http: HttpClient, base_url: &str, deadline: Duration) -> Result<Self> {
        let endpoint = meetings_endpoint(base_url)?;
        Ok(Self { http, endpoint, deadline })
    }

    /// Build the backend and its HTTP client from configuration.
    ///
    /// # Errors
    /// Returns `Config` for an invalid base URL or client settings.
    pub fn from_config(config: &RemoteConfig) -> Result<Self> {
        let http = HttpClient::from_config(config)?;
        let deadline = call_deadline(Duration::from_secs(config.timeout_secs), http.retry_policy());
        Self::new(http, &config.base_url, deadline)
    }

    /// Collection endpoint, `{base}/api/meetings`
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn item_url(&self, id: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("id", id);
        url
    }

    async fn dispatch(&self, builder: RequestBuilder) -> std::result::Result<Response, ApiError> {
        match tokio::time::timeout(self.deadline, self.http.send(builder)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => Err(ApiError::from(err)),
            Err(_) => Err(ApiError::Timeout(self.deadline)),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> std::result::Result<T, ApiError> {
        let response = self.dispatch(builder).await?;
        let status = response.status();
        let url = response.url().to_string();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &url, &body));
        }

        response.json().await.map_err(|e| ApiError::Decode(format!("{url}: {e}")))
    }
}

/// Every attempt may run to its timeout, with the backoff pauses in between.
fn call_deadline(per_attempt: Duration, retry: RetryPolicy) -> Duration {
    let attempts = u32::try_from(retry.attempts()).unwrap_or(u32::MAX);
    per_attempt.saturating_mul(attempts).saturating_add(retry.total_backoff())
}

fn meetings_endpoint(base_url: &str) -> Result<Url> {
    let raw = format!("{}{}", base_url.trim().trim_end_matches('/'), MEETINGS_API_PATH);
    let url = Url::parse(&raw)
        .map_err(|e| SchoolHubError::Config(format!("invalid remote base URL '{base_url}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SchoolHubError::Config(format!("unsupported remote URL scheme '{other}'"))),
    }
}

fn report(operation: &'static str, err: ApiError) -> SchoolHubError {
    warn!(
        operation,
        category = ?err.category(),
        retryable = err.should_retry(),
        error = %err,
        "remote meetings call failed"
    );
    err.into()
}

#[async_trait]
impl RemoteMeetingBackend for HttpMeetingBackend {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn list_meetings(&self) -> Result<Vec<Meeting>> {
        let request = self.http.request(Method::GET, self.endpoint.clone());
        let meetings: Vec<Meeting> = self.call(request).await.map_err(|e| report("list", e))?;
        debug!(count = meetings.len(), "listed remote meetings");
        Ok(meetings)
    }

    #[instrument(skip(self, meeting), fields(meeting_id = %meeting.id))]
    async fn create_meeting(&self, meeting: &Meeting) -> Result<Meeting> {
        let request = self.http.request(Method::POST, self.endpoint.clone()).json(meeting);
        self.call(request).await.map_err(|e| report("create", e))
    }

    #[instrument(skip(self, meeting))]
    async fn update_meeting(&self, id: &str, meeting: &Meeting) -> Result<Meeting> {
        let request = self.http.request(Method::PUT, self.item_url(id)).json(meeting);
        self.call(request).await.map_err(|e| report("update", e))
    }

    #[instrument(skip(self))]
    async fn delete_meeting(&self, id: &str) -> Result<()> {
        let request = self.http.request(Method::DELETE, self.item_url(id));
        let response = self.dispatch(request).await.map_err(|e| report("delete", e))?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::NOT_FOUND {
            debug!(meeting_id = id, "remote meeting already absent");
            return Ok(());
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(report("delete", ApiError::from_status(status, &url, &body)))
    }
}
