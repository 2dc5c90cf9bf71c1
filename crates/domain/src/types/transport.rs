//! Transport requests

use serde::{Deserialize, Serialize};

use crate::impl_wire_value_conversions;

/// Transport request category (`tm:type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportRequestType {
    /// Workbench request
    #[default]
    Workbench,
    /// Customizing request
    Customizing,
}

impl_wire_value_conversions!(TransportRequestType {
    Workbench => "K",
    Customizing => "W",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    pub description: String,
    #[serde(default)]
    pub request_type: TransportRequestType,
    /// Transport target; `LOCAL` when unset
    #[serde(default)]
    pub target: Option<String>,
    /// Task owner; defaults to the logged-on user on the server side
    #[serde(default)]
    pub owner: Option<String>,
}

impl TransportConfig {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            request_type: TransportRequestType::default(),
            target: None,
            owner: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportRequest {
    pub number: String,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub target: Option<String>,
    pub status: Option<String>,
    pub request_type: Option<TransportRequestType>,
}

impl TransportRequest {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            description: None,
            owner: None,
            target: None,
            status: None,
            request_type: None,
        }
    }
}
