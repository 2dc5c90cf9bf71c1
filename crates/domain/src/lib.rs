//! # AdtKit Domain
//!
//! Domain types for the SAP ABAP Development Tools (ADT) client.
//!
//! This crate contains:
//! - Per-kind object configurations and the `ObjectConfig` view over them
//! - Transport-neutral request/response values
//! - Lock handles, check reports, activation and validation outcomes
//! - Operation state accumulated by a chain
//! - Error types, Result definitions and configuration structures
//!
//! ## Architecture
//! - No dependencies on other AdtKit crates
//! - No I/O; pure data and the rules that interpret it

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
