//! Activation outcome

use serde::{Deserialize, Serialize};

use super::check::CheckSeverity;
use crate::errors::{AdtError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationMessage {
    pub severity: CheckSeverity,
    pub text: String,
    pub object_description: Option<String>,
    pub href: Option<String>,
    pub line: Option<u32>,
}

/// Parsed `chkl:messages` / `chkl:properties` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationResult {
    pub activated: bool,
    pub checked: bool,
    pub generated: bool,
    pub messages: Vec<ActivationMessage>,
}

impl ActivationResult {
    pub fn errors(&self) -> impl Iterator<Item = &ActivationMessage> {
        self.messages.iter().filter(|m| m.severity == CheckSeverity::Error)
    }

    /// Fail with `AdtError::Activation` when SAP reported errors.
    pub fn into_result(self, object_name: &str) -> Result<Self> {
        let details: Vec<&str> = self.errors().map(|m| m.text.as_str()).collect();
        if details.is_empty() {
            return Ok(self);
        }
        Err(AdtError::Activation(format!("{object_name}: {}", details.join("; "))))
    }
}
