//! HTTP-backed ADT connection
//!
//! Handles basic auth, `sap-client`/`sap-language`, the CSRF token
//! handshake, session cookies and the stateful/stateless session marker.
//! Connection state sits behind `RwLock`s so one connection can be shared
//! through `Arc<dyn AdtConnection>`.

use std::time::Duration;

use adtkit_core::AdtConnection;
use adtkit_domain::constants::{
    CSRF_FETCH, CSRF_REQUIRED, DISCOVERY_PATH, HEADER_CONNECTION_ID, HEADER_CSRF_TOKEN,
    HEADER_SESSION_TYPE,
};
use adtkit_domain::{
    AdtError, AdtRequest, AdtResponse, ConnectionConfig, HttpMethod, Result, SessionType,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::Method;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::exception::{error_from_response, parse_exception};
use crate::http::HttpClient;

struct SessionState {
    session_type: SessionType,
    csrf_token: Option<String>,
    session_id: String,
}

impl SessionState {
    fn fresh() -> Self {
        Self {
            session_type: SessionType::Stateless,
            csrf_token: None,
            session_id: Uuid::new_v4().to_string(),
        }
    }
}

pub struct HttpAdtConnection {
    config: ConnectionConfig,
    base_url: Url,
    http: RwLock<HttpClient>,
    state: RwLock<SessionState>,
}

impl HttpAdtConnection {
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        let base_url = Url::parse(config.url.trim_end_matches('/'))
            .map_err(|err| AdtError::Config(format!("invalid SAP url '{}': {err}", config.url)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(AdtError::Config(format!("SAP url '{}' is not http(s)", config.url)));
        }
        if config.username.is_empty() {
            return Err(AdtError::Config("SAP username is required".into()));
        }
        let http = build_client(&config)?;

        Ok(Self {
            config,
            base_url,
            http: RwLock::new(http),
            state: RwLock::new(SessionState::fresh()),
        })
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// CSRF token currently in use, if one was fetched.
    pub fn csrf_token(&self) -> Option<String> {
        self.state.read().csrf_token.clone()
    }

    /// Request path appended to the configured URL, keeping any path
    /// prefix of a gateway or reverse proxy.
    fn url_for(&self, request: &AdtRequest) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!(
            "{}/{}",
            self.base_url.path().trim_end_matches('/'),
            request.path.trim_start_matches('/')
        ));
        url.set_query(None);
        {
            let mut query = url.query_pairs_mut();
            if let Some(client) = self.config.client.as_deref().filter(|c| !c.is_empty()) {
                query.append_pair("sap-client", client);
            }
            if !self.config.language.is_empty() {
                query.append_pair("sap-language", &self.config.language);
            }
            for (name, value) in &request.query {
                query.append_pair(name, value);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        url
    }

    async fn send(&self, request: &AdtRequest, csrf_token: Option<&str>) -> Result<AdtResponse> {
        let url = self.url_for(request);
        let (session_type, session_id) = {
            let state = self.state.read();
            (state.session_type, state.session_id.clone())
        };
        let http = self.http.read().clone();

        let mut builder = http
            .request(to_reqwest_method(request.method), url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(HEADER_SESSION_TYPE, session_type.as_str())
            .header(HEADER_CONNECTION_ID, session_id);
        if let Some(token) = csrf_token {
            builder = builder.header(HEADER_CSRF_TOKEN, token);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        debug!(method = %request.method, path = %request.path, session = %session_type, "sending ADT request");
        let response = http.send(builder).await?;

        let status = response.status().as_u16();
        let mut adt_response = AdtResponse::new(status, String::new());
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                adt_response = adt_response.with_header(name.as_str(), value);
            }
        }
        adt_response.body = response
            .text()
            .await
            .map_err(|err| AdtError::Network(format!("failed to read ADT response body: {err}")))?;

        debug!(method = %request.method, path = %request.path, status, "received ADT response");
        Ok(adt_response)
    }

    async fn fetch_csrf_token(&self) -> Result<String> {
        let request = AdtRequest::get(DISCOVERY_PATH)
            .header(HEADER_CSRF_TOKEN, CSRF_FETCH)
            .accept("application/atomsvc+xml");
        let response = self.send(&request, None).await?;

        if !response.is_success() {
            return Err(error_from_response(response.status, &response.body));
        }

        let token = response
            .header(HEADER_CSRF_TOKEN)
            .filter(|token| !token.is_empty() && !token.eq_ignore_ascii_case(CSRF_REQUIRED))
            .map(str::to_string)
            .ok_or_else(|| AdtError::Auth("SAP did not return a CSRF token".into()))?;

        self.state.write().csrf_token = Some(token.clone());
        debug!("CSRF token fetched");
        Ok(token)
    }

    async fn token_for(&self, method: HttpMethod) -> Result<Option<String>> {
        if let Some(token) = self.csrf_token() {
            return Ok(Some(token));
        }
        if method.is_idempotent() {
            return Ok(None);
        }
        self.fetch_csrf_token().await.map(Some)
    }
}

#[async_trait]
impl AdtConnection for HttpAdtConnection {
    async fn make_adt_request(&self, request: AdtRequest) -> Result<AdtResponse> {
        let token = self.token_for(request.method).await?;
        let mut response = self.send(&request, token.as_deref()).await?;

        if response.status == 403 && csrf_required(&response) {
            debug!(path = %request.path, "CSRF token rejected, refetching");
            let token = self.fetch_csrf_token().await?;
            response = self.send(&request, Some(&token)).await?;
        }

        if !response.is_success() {
            return Err(error_from_response(response.status, &response.body));
        }
        // SAP sometimes reports business errors with a 2xx status
        if parse_exception(&response.body).is_some() {
            debug!(path = %request.path, status = response.status, "exception in successful response");
            return Err(error_from_response(response.status, &response.body));
        }
        Ok(response)
    }

    fn set_session_type(&self, session_type: SessionType) {
        self.state.write().session_type = session_type;
    }

    fn session_type(&self) -> SessionType {
        self.state.read().session_type
    }

    fn session_id(&self) -> Option<String> {
        Some(self.state.read().session_id.clone())
    }

    async fn connect(&self) -> Result<()> {
        self.fetch_csrf_token().await?;
        info!(url = %self.base_url, "connected to SAP system");
        Ok(())
    }

    fn reset(&self) {
        *self.state.write() = SessionState::fresh();
        match build_client(&self.config) {
            Ok(client) => *self.http.write() = client,
            Err(error) => warn!(error = %error, "could not rebuild HTTP client; keeping cookies"),
        }
        debug!("ADT session reset");
    }

    fn base_url(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }
}

fn build_client(config: &ConnectionConfig) -> Result<HttpClient> {
    HttpClient::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .max_attempts(config.max_attempts)
        .accept_invalid_certs(config.accept_invalid_certs)
        .user_agent(concat!("adtkit/", env!("CARGO_PKG_VERSION")))
        .build()
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Head => Method::HEAD,
    }
}

fn csrf_required(response: &AdtResponse) -> bool {
    response.header(HEADER_CSRF_TOKEN).is_some_and(|value| value.eq_ignore_ascii_case(CSRF_REQUIRED))
}
