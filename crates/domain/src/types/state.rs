//! Per-call operation state
//!
//! Built fresh for each adapter call or builder, owned by it, and handed
//! back to the caller for inspection. Nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::activation::ActivationResult;
use super::check::CheckReport;
use super::lock::LockHandle;
use super::request::AdtResponse;
use super::transport::TransportRequest;
use super::validation::ValidationOutcome;
use crate::errors::AdtError;
use crate::impl_wire_value_conversions;

/// Chain step names used in the error log and the completed-step log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationMethod {
    Validate,
    Create,
    Read,
    ReadSource,
    Lock,
    Check,
    Update,
    Unlock,
    Activate,
    CheckDeletion,
    Delete,
    ForceUnlock,
    CreateTransport,
}

impl_wire_value_conversions!(OperationMethod {
    Validate => "validate",
    Create => "create",
    Read => "read",
    ReadSource => "readSource",
    Lock => "lock",
    Check => "check",
    Update => "update",
    Unlock => "unlock",
    Activate => "activate",
    CheckDeletion => "checkDeletion",
    Delete => "delete",
    ForceUnlock => "forceUnlock",
    CreateTransport => "createTransport",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationErrorEntry {
    pub method: OperationMethod,
    pub error: AdtError,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedStep {
    pub method: OperationMethod,
    pub timestamp: DateTime<Utc>,
}

/// Accumulated results of one operation chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationState {
    pub validation_response: Option<ValidationOutcome>,
    pub create_result: Option<AdtResponse>,
    pub lock_handle: Option<LockHandle>,
    pub check_result: Option<CheckReport>,
    pub update_result: Option<AdtResponse>,
    pub unlock_result: Option<AdtResponse>,
    pub activate_result: Option<ActivationResult>,
    pub delete_result: Option<AdtResponse>,
    pub read_result: Option<AdtResponse>,
    pub source_result: Option<String>,
    pub transport_result: Option<TransportRequest>,
    pub completed: Vec<CompletedStep>,
    pub errors: Vec<OperationErrorEntry>,
}

impl OperationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, method: OperationMethod) {
        self.completed.push(CompletedStep { method, timestamp: Utc::now() });
    }

    pub fn record_error(&mut self, method: OperationMethod, error: &AdtError) {
        self.errors.push(OperationErrorEntry { method, error: error.clone(), timestamp: Utc::now() });
    }

    /// Steps completed so far, in order.
    pub fn completed_methods(&self) -> Vec<OperationMethod> {
        self.completed.iter().map(|step| step.method).collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_steps_in_order() {
        let mut state = OperationState::new();
        state.record_success(OperationMethod::Validate);
        state.record_success(OperationMethod::Create);
        state.record_error(OperationMethod::Lock, &AdtError::Lock("busy".into()));

        assert_eq!(
            state.completed_methods(),
            vec![OperationMethod::Validate, OperationMethod::Create]
        );
        assert!(state.has_errors());
        assert_eq!(state.errors[0].method, OperationMethod::Lock);
    }

    #[test]
    fn method_names_match_chain_vocabulary() {
        assert_eq!(OperationMethod::ForceUnlock.to_string(), "forceUnlock");
        assert_eq!(OperationMethod::CheckDeletion.as_str(), "checkDeletion");
    }
}
