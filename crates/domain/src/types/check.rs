//! Syntax check reports
//!
//! A check run returns one report per checked object. Messages are split
//! into errors and warnings; SAP also emits a few messages that never
//! indicate a defect in the object, which callers filter out before
//! deciding whether the check failed.

use serde::{Deserialize, Serialize};

use crate::errors::{AdtError, Result};
use crate::impl_wire_value_conversions;

/// Severity letter used by `chkrun:type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckSeverity {
    Error,
    Warning,
    Info,
}

impl_wire_value_conversions!(CheckSeverity {
    Error => "E",
    Warning => "W",
    Info => "I",
});

impl CheckSeverity {
    /// Lenient parse: abort-type messages count as errors, unknown as info.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "E" | "A" | "X" => Self::Error,
            "W" => Self::Warning,
            _ => Self::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckMessage {
    pub severity: CheckSeverity,
    pub text: String,
    /// Location URI, e.g. `.../source/main#start=3,0`
    pub uri: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub code: Option<String>,
}

impl CheckMessage {
    pub fn new(severity: CheckSeverity, text: impl Into<String>) -> Self {
        Self { severity, text: text.into(), uri: None, line: None, column: None, code: None }
    }

    fn describe(&self) -> String {
        match self.line {
            Some(line) => format!("line {line}: {}", self.text),
            None => self.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub reporter: Option<String>,
    pub triggering_uri: Option<String>,
    pub status: Option<String>,
    pub status_text: Option<String>,
    pub messages: Vec<CheckMessage>,
}

impl CheckReport {
    pub fn errors(&self) -> impl Iterator<Item = &CheckMessage> {
        self.messages.iter().filter(|m| m.severity == CheckSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &CheckMessage> {
        self.messages.iter().filter(|m| m.severity == CheckSeverity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Drop messages whose text contains any of `benign` (case-insensitive).
    #[must_use]
    pub fn without_benign(mut self, benign: &[&str]) -> Self {
        let needles: Vec<String> = benign.iter().map(|b| b.to_lowercase()).collect();
        self.messages.retain(|message| {
            let text = message.text.to_lowercase();
            !needles.iter().any(|needle| text.contains(needle.as_str()))
        });
        self
    }

    /// Fail with `AdtError::Check` when errors remain, otherwise hand the
    /// report back.
    pub fn into_result(self, object_name: &str) -> Result<Self> {
        if !self.has_errors() {
            return Ok(self);
        }

        let details: Vec<String> = self.errors().map(CheckMessage::describe).collect();
        Err(AdtError::Check(format!("{object_name}: {}", details.join("; "))))
    }
}
