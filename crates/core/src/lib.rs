//! # AdtKit Core
//!
//! Lifecycle logic for ABAP repository objects - no HTTP code.
//!
//! This crate contains:
//! - Port interfaces for the SAP connection and per-kind operations
//! - The generic create/update/delete driver
//! - The step-by-step builder and the stateful session guard
//!
//! ## Architecture Principles
//! - Only depends on `adtkit-domain`
//! - All SAP access via traits
//! - Ordering, session switching and cleanup are kind-independent

pub mod adt_ports;
pub mod lifecycle;

pub use adt_ports::{AdtConnection, ObjectOperations, TransportService};
pub use lifecycle::{
    with_stateful_session, CreateOptions, LockCallback, ObjectAdapter, ObjectBuilder,
    PollingOptions, StatefulSession, UpdateOptions,
};
