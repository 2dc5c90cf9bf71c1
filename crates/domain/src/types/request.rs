//! Transport-neutral request and response values exchanged with ADT.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::impl_wire_value_conversions;

/// HTTP method subset used by ADT endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl_wire_value_conversions!(HttpMethod {
    Get => "GET",
    Post => "POST",
    Put => "PUT",
    Delete => "DELETE",
    Head => "HEAD",
});

impl HttpMethod {
    /// Methods that may be resent without changing remote state.
    pub fn is_idempotent(&self) -> bool {
        matches!(self, Self::Get | Self::Head)
    }
}

/// SAP HTTP session mode
///
/// Stateful sessions keep the server-side lock context alive across
/// requests and are required between lock and unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Stateful,
    #[default]
    Stateless,
}

impl_wire_value_conversions!(SessionType {
    Stateful => "stateful",
    Stateless => "stateless",
});

/// A single ADT call, built by the low-level operation functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdtRequest {
    pub method: HttpMethod,
    /// Path relative to the system base URL, e.g. `/sap/bc/adt/programs/programs`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
}

impl AdtRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter only when `value` is present.
    #[must_use]
    pub fn query_opt(self, name: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(value) if !value.is_empty() => self.query(name, value),
            _ => self,
        }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn accept(self, value: impl Into<String>) -> Self {
        self.header("Accept", value)
    }

    #[must_use]
    pub fn content_type(self, value: impl Into<String>) -> Self {
        self.header("Content-Type", value)
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Value of a query parameter, if set.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    /// Value of a request header (case-insensitive), if set.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw ADT response kept for introspection of each chain step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdtResponse {
    pub status: u16,
    /// Header names are stored lower-case.
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl AdtResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, headers: BTreeMap::new(), body: body.into() }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_collects_parts() {
        let request = AdtRequest::post("/sap/bc/adt/programs/programs/z_demo")
            .query("_action", "LOCK")
            .query_opt("corrNr", None)
            .query_opt("lockHandle", Some(""))
            .content_type("text/plain")
            .body("REPORT z_demo.");

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.query_value("_action"), Some("LOCK"));
        assert_eq!(request.query.len(), 1);
        assert_eq!(request.header_value("content-type"), Some("text/plain"));
        assert_eq!(request.body.as_deref(), Some("REPORT z_demo."));
    }

    #[test]
    fn response_headers_are_case_insensitive() {
        let response = AdtResponse::new(200, "").with_header("X-CSRF-Token", "abc");
        assert_eq!(response.header("x-csrf-token"), Some("abc"));
        assert!(response.is_success());
    }

    #[test]
    fn only_reads_are_idempotent() {
        assert!(HttpMethod::Get.is_idempotent());
        assert!(!HttpMethod::Post.is_idempotent());
        assert!(!HttpMethod::Put.is_idempotent());
    }

    #[test]
    fn session_type_defaults_to_stateless() {
        assert_eq!(SessionType::default(), SessionType::Stateless);
        assert_eq!(SessionType::Stateful.to_string(), "stateful");
    }
}
