//! Object name validation outcome

use serde::{Deserialize, Serialize};

use crate::errors::{AdtError, Result};

/// Parsed `asx:abap` validation payload (`SEVERITY`, `SHORT_TEXT`, `LONG_TEXT`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub severity: String,
    pub short_text: Option<String>,
    pub long_text: Option<String>,
}

impl ValidationOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self.severity.to_ascii_uppercase().as_str(), "ERROR" | "E" | "ABORT")
    }

    pub fn into_result(self, object_name: &str) -> Result<Self> {
        if !self.is_error() {
            return Ok(self);
        }
        let text = self
            .short_text
            .clone()
            .or_else(|| self.long_text.clone())
            .unwrap_or_else(|| "object name rejected".to_string());
        Err(AdtError::Validation(format!("{object_name}: {text}")))
    }
}
