//! Error types used throughout the ADT client

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for AdtKit
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum AdtError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Business error reported by SAP in an `exc:exception` body.
    #[error("SAP error (HTTP {status}): {message}")]
    Sap { status: u16, exception_type: Option<String>, message: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Lock error: {0}")]
    Lock(String),

    #[error("Syntax check failed: {0}")]
    Check(String),

    #[error("Activation failed: {0}")]
    Activation(String),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// A chain step failed and at least one cleanup step failed afterwards.
    #[error("{primary} (cleanup failed: {})", join_failures(.failures))]
    Cleanup { primary: Box<AdtError>, failures: Vec<CleanupFailure> },
}

/// Result type alias for ADT operations
pub type Result<T> = std::result::Result<T, AdtError>;

/// Cleanup step attempted after a chain failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupStep {
    Unlock,
    Delete,
}

impl fmt::Display for CleanupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlock => write!(f, "unlock"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// A secondary failure raised while cleaning up after a failed chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupFailure {
    pub step: CleanupStep,
    pub error: AdtError,
}

impl CleanupFailure {
    pub fn new(step: CleanupStep, error: AdtError) -> Self {
        Self { step, error }
    }
}

fn join_failures(failures: &[CleanupFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("{}: {}", failure.step, failure.error))
        .collect::<Vec<_>>()
        .join("; ")
}

impl AdtError {
    /// Attach cleanup failures to this error.
    ///
    /// Returns `self` unchanged when `failures` is empty. Attaching to an
    /// existing `Cleanup` error extends its failure list instead of nesting.
    #[must_use]
    pub fn with_cleanup_failures(self, failures: Vec<CleanupFailure>) -> Self {
        if failures.is_empty() {
            return self;
        }

        match self {
            Self::Cleanup { primary, failures: mut existing } => {
                existing.extend(failures);
                Self::Cleanup { primary, failures: existing }
            }
            other => Self::Cleanup { primary: Box::new(other), failures },
        }
    }

    /// The error that aborted the chain, looking through `Cleanup`.
    pub fn primary(&self) -> &AdtError {
        match self {
            Self::Cleanup { primary, .. } => primary.primary(),
            other => other,
        }
    }

    /// Cleanup failures carried by this error, if any.
    pub fn cleanup_failures(&self) -> &[CleanupFailure] {
        match self {
            Self::Cleanup { failures, .. } => failures,
            _ => &[],
        }
    }

    /// True when the remote object (or resource) does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self.primary(), Self::NotFound(_))
    }

    /// HTTP status reported by SAP, when the error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self.primary() {
            Self::Sap { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cleanup_keeps_original_error() {
        let err = AdtError::Check("missing ENDIF".into());
        let combined = err.clone().with_cleanup_failures(Vec::new());
        assert_eq!(combined, err);
    }

    #[test]
    fn cleanup_failures_wrap_primary() {
        let err = AdtError::Check("missing ENDIF".into()).with_cleanup_failures(vec![
            CleanupFailure::new(CleanupStep::Unlock, AdtError::Network("reset".into())),
        ]);

        assert_eq!(err.primary(), &AdtError::Check("missing ENDIF".into()));
        assert_eq!(err.cleanup_failures().len(), 1);
        let message = err.to_string();
        assert!(message.contains("missing ENDIF"));
        assert!(message.contains("unlock: Network error: reset"));
    }

    #[test]
    fn attaching_twice_flattens() {
        let err = AdtError::Internal("boom".into())
            .with_cleanup_failures(vec![CleanupFailure::new(
                CleanupStep::Unlock,
                AdtError::Lock("stale".into()),
            )])
            .with_cleanup_failures(vec![CleanupFailure::new(
                CleanupStep::Delete,
                AdtError::Auth("denied".into()),
            )]);

        assert_eq!(err.cleanup_failures().len(), 2);
        assert_eq!(err.primary(), &AdtError::Internal("boom".into()));
    }

    #[test]
    fn not_found_is_detected_through_cleanup() {
        let err = AdtError::NotFound("ZPROG".into()).with_cleanup_failures(vec![
            CleanupFailure::new(CleanupStep::Delete, AdtError::Network("down".into())),
        ]);
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn serializes_with_type_tag() {
        let err = AdtError::Lock("no handle".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Lock");
        assert_eq!(json["message"], "no handle");
    }
}
