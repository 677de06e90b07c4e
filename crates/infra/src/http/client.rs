use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use schoolhub_domain::constants::{DEFAULT_REMOTE_MAX_ATTEMPTS, DEFAULT_REMOTE_TIMEOUT_SECS};
use schoolhub_domain::{RemoteConfig, SchoolHubError};
use tracing::debug;

use crate::errors::InfraError;

const DEFAULT_BASE_BACKOFF: Duration = Duration::from_millis(200);
// Caps the exponent so a misconfigured attempt count cannot overflow.
const MAX_BACKOFF_DOUBLINGS: u32 = 8;

/// Attempt budget and backoff schedule for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: usize,
    base_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: usize, base_backoff: Duration) -> Self {
        Self { attempts: attempts.max(1), base_backoff }
    }

    /// Total attempts, the first one included.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Pause before retry number `retry` (1-based): base, 2×base, 4×base...
    pub fn delay_before(&self, retry: usize) -> Duration {
        let doublings = u32::try_from(retry.saturating_sub(1))
            .unwrap_or(u32::MAX)
            .min(MAX_BACKOFF_DOUBLINGS);
        self.base_backoff.saturating_mul(1u32 << doublings)
    }

    /// Sum of every pause between attempts when the whole budget is spent.
    pub fn total_backoff(&self) -> Duration {
        (1..self.attempts).fold(Duration::ZERO, |sum, retry| {
            sum.saturating_add(self.delay_before(retry))
        })
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_REMOTE_MAX_ATTEMPTS, DEFAULT_BASE_BACKOFF)
    }
}

/// reqwest client that retries server errors and transport failures.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: ReqwestClient,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client for the remote meetings backend.
    ///
    /// # Errors
    /// Returns `Config` when the underlying client cannot be built.
    pub fn from_config(config: &RemoteConfig) -> Result<Self, SchoolHubError> {
        Self::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .max_attempts(config.max_attempts)
            .user_agent(concat!("schoolhub/", env!("CARGO_PKG_VERSION")))
            .build()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.inner.request(method, url)
    }

    /// Execute `builder`, retrying 5xx responses and transport failures.
    ///
    /// Any other response, including 4xx, is handed back unchanged for the
    /// caller to classify. The last 5xx response is returned once the
    /// attempt budget is spent.
    ///
    /// # Errors
    /// `Network` for transport failures on the final attempt, `Internal`
    /// when the request body cannot be replayed.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, SchoolHubError> {
        let attempts = self.retry.attempts();
        let mut attempt = 1;

        loop {
            let request = builder
                .try_clone()
                .ok_or_else(|| {
                    SchoolHubError::Internal("streaming request bodies cannot be retried".into())
                })?
                .build()
                .map_err(|err| SchoolHubError::from(InfraError::from(err)))?;
            let (method, url) = (request.method().clone(), request.url().clone());
            let last = attempt >= attempts;

            match self.inner.execute(request).await {
                Ok(response) if response.status().is_server_error() && !last => {
                    let status = response.status();
                    debug!(attempt, %method, %url, %status, "server error, retrying");
                }
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt, %method, %url, %status, "response received");
                    return Ok(response);
                }
                Err(err) if is_transient(&err) && !last => {
                    debug!(attempt, %method, %url, error = %err, "transport failure, retrying");
                }
                Err(err) => return Err(InfraError::from(err).into()),
            }

            let delay = self.retry.delay_before(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            attempt += 1;
        }
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    retry: RetryPolicy,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_REMOTE_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    /// Per-attempt timeout.
    pub fn timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    /// Total attempts per request, initial try included.
    pub fn max_attempts(self, attempts: usize) -> Self {
        let retry = RetryPolicy::new(attempts, self.retry.base_backoff);
        Self { retry, ..self }
    }

    pub fn base_backoff(self, backoff: Duration) -> Self {
        let retry = RetryPolicy::new(self.retry.attempts, backoff);
        Self { retry, ..self }
    }

    pub fn user_agent(self, agent: impl Into<String>) -> Self {
        Self { user_agent: Some(agent.into()), ..self }
    }

    /// # Errors
    /// Returns `Config` when reqwest rejects the settings.
    pub fn build(self) -> Result<HttpClient, SchoolHubError> {
        let builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();
        let builder = match self.user_agent {
            Some(agent) => builder.user_agent(agent),
            None => builder,
        };

        let inner = builder.build().map_err(|err| SchoolHubError::from(InfraError::from(err)))?;
        Ok(HttpClient { inner, retry: self.retry })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use reqwest::StatusCode;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn fast_client(attempts: usize) -> HttpClient {
        HttpClient::builder()
            .base_backoff(Duration::from_millis(2))
            .max_attempts(attempts)
            .build()
            .unwrap()
    }

    async fn get(client: &HttpClient, url: String) -> Result<Response, SchoolHubError> {
        client.send(client.request(Method::GET, url)).await
    }

    #[tokio::test]
    async fn flaky_listing_succeeds_on_third_attempt() {
        let server = MockServer::start().await;
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        Mock::given(method("GET"))
            .and(path("/api/meetings"))
            .respond_with(move |_: &wiremock::Request| {
                match counter.fetch_add(1, Ordering::SeqCst) {
                    0 => ResponseTemplate::new(502),
                    1 => ResponseTemplate::new(503),
                    _ => ResponseTemplate::new(200).set_body_string("[]"),
                }
            })
            .mount(&server)
            .await;

        let url = format!("{}/api/meetings", server.uri());
        let response = get(&fast_client(3), url).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn last_server_error_is_returned_when_budget_is_spent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let response = get(&fast_client(2), server.uri()).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn client_errors_are_returned_on_first_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = fast_client(3);
        let response = client.send(client.request(Method::DELETE, server.uri())).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

        let result = get(&fast_client(2), format!("http://{addr}")).await;

        assert!(matches!(result, Err(SchoolHubError::Network(_))), "got {result:?}");
    }

    #[test]
    fn backoff_doubles_and_is_capped() {
        let policy = RetryPolicy::new(20, Duration::from_millis(100));

        assert_eq!(policy.delay_before(1), Duration::from_millis(100));
        assert_eq!(policy.delay_before(3), Duration::from_millis(400));
        assert_eq!(policy.delay_before(15), Duration::from_millis(100 * 256));
    }

    #[test]
    fn total_backoff_sums_every_pause() {
        assert_eq!(
            RetryPolicy::new(4, Duration::from_millis(100)).total_backoff(),
            Duration::from_millis(100 + 200 + 400)
        );
        assert_eq!(RetryPolicy::new(1, Duration::from_secs(5)).total_backoff(), Duration::ZERO);
    }

    #[test]
    fn zero_attempts_still_sends_once() {
        assert_eq!(fast_client(0).retry_policy().attempts(), 1);
    }
}
