use std::time::Duration;

use adtkit_domain::AdtError;
use reqwest::{Client as ReqwestClient, Method, Request, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// Retry budget for reads against the ADT server.
///
/// Writes (lock, create, update, activate, delete) are never repeated: a
/// second LOCK or POST after a lost response changes server state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts for GET/HEAD, including the first one
    pub max_attempts: usize,
    /// Delay before the first retry; doubled for each further retry
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 1, base_backoff: Duration::from_millis(200) }
    }
}

impl RetryPolicy {
    fn attempts_for(&self, method: &Method) -> usize {
        if matches!(*method, Method::GET | Method::HEAD) {
            self.max_attempts.max(1)
        } else {
            1
        }
    }

    fn delay(&self, retry: usize) -> Duration {
        let shift = retry.saturating_sub(1).min(8) as u32;
        self.base_backoff.saturating_mul(1u32 << shift)
    }
}

/// reqwest client shared by one ADT connection.
///
/// Keeps the SAP session cookies and applies the [`RetryPolicy`].
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Send the request. Reads are retried on 5xx and transport errors.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, AdtError> {
        let request = builder.build().map_err(|err| AdtError::from(InfraError::from(err)))?;
        let attempts = self.retry.attempts_for(request.method());
        let mut next = Some(request);
        let mut attempt = 0;

        while let Some(request) = next.take() {
            attempt += 1;
            if attempt < attempts {
                next = request.try_clone();
            }

            let retry_left = next.is_some();
            match self.execute(request, attempt).await {
                Ok(response) if response.status().is_server_error() && retry_left => {}
                Ok(response) => return Ok(response),
                Err(err) if retry_left && is_transient(&err) => {}
                Err(err) => return Err(InfraError::from(err).into()),
            }

            let delay = self.retry.delay(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        Err(AdtError::Internal("request could not be cloned for a retry".into()))
    }

    async fn execute(&self, request: Request, attempt: usize) -> reqwest::Result<Response> {
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let result = self.client.execute(request).await;
        match &result {
            Ok(response) => {
                debug!(attempt, %method, %path, status = %response.status(), "HTTP response")
            }
            Err(err) => debug!(attempt, %method, %path, error = %err, "HTTP request failed"),
        }
        result
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    retry: RetryPolicy,
    user_agent: Option<String>,
    accept_invalid_certs: bool,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            user_agent: None,
            accept_invalid_certs: false,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total attempts for idempotent requests.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.retry.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.retry.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Allow self-signed certificates, common on SAP development systems.
    pub fn accept_invalid_certs(mut self, enabled: bool) -> Self {
        self.accept_invalid_certs = enabled;
        self
    }

    pub fn build(self) -> Result<HttpClient, AdtError> {
        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .cookie_store(true)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| AdtError::from(InfraError::from(err)))?;
        Ok(HttpClient { client, retry: self.retry })
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use reqwest::StatusCode;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn retrying_client() -> HttpClient {
        HttpClient::builder()
            .base_backoff(Duration::from_millis(10))
            .max_attempts(3)
            .build()
            .expect("http client")
    }

    /// Answers 500 for the first `failures` calls, then 200.
    fn flaky(failures: usize) -> impl Fn(&wiremock::Request) -> ResponseTemplate {
        let calls = Arc::new(AtomicUsize::new(0));
        move |_req: &wiremock::Request| {
            if calls.fetch_add(1, Ordering::SeqCst) < failures {
                ResponseTemplate::new(500)
            } else {
                ResponseTemplate::new(200)
            }
        }
    }

    #[test]
    fn backoff_doubles_per_retry() {
        let policy = RetryPolicy { max_attempts: 4, base_backoff: Duration::from_millis(100) };
        assert_eq!(policy.delay(1), Duration::from_millis(100));
        assert_eq!(policy.delay(3), Duration::from_millis(400));
        assert_eq!(policy.attempts_for(&Method::GET), 4);
        assert_eq!(policy.attempts_for(&Method::POST), 1);
    }

    #[tokio::test]
    async fn retries_reads_until_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(flaky(2)).expect(3).mount(&server).await;

        let client = retrying_client();
        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn never_retries_writes() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(flaky(2)).expect(1).mount(&server).await;

        let client = retrying_client();
        let response = client
            .send(client.request(Method::POST, server.uri()).body("<lock/>"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn default_client_sends_reads_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(flaky(1)).expect(1).mount(&server).await;

        let client = HttpClient::builder().build().expect("http client");
        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn refused_connection_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = HttpClient::builder()
            .base_backoff(Duration::from_millis(5))
            .max_attempts(2)
            .build()
            .expect("http client");

        let result = client.send(client.request(Method::GET, &url)).await;
        assert!(matches!(result, Err(AdtError::Network(_))), "{:?}", result.map(|r| r.status()));
    }
}
