//! # AdtKit Infrastructure
//!
//! Infrastructure implementations of the core ADT ports.
//!
//! This crate contains:
//! - The reqwest-backed `HttpAdtConnection` (CSRF, cookies, session type)
//! - XML helpers and SAP exception parsing
//! - Low-level ADT operations shared by every object kind
//! - One module per object kind, with named functions and type aliases
//! - Transport requests, configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `adtkit-core`
//! - Depends on `adtkit-domain` and `adtkit-core`
//! - Contains all "impure" code (HTTP, XML, environment, files)

pub mod config;
pub mod connection;
pub mod errors;
pub mod exception;
pub mod http;
pub mod logging;
pub mod objects;
pub mod operations;
pub mod transport;
pub mod xml;

// Re-export commonly used items
pub use connection::HttpAdtConnection;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use logging::init_tracing;
pub use objects::*;
pub use transport::Transports;
