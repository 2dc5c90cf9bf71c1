//! Operation chains over [`ObjectOperations`](crate::adt_ports::ObjectOperations)

pub mod adapter;
pub mod builder;
pub mod options;
pub mod session;

pub use adapter::ObjectAdapter;
pub use builder::ObjectBuilder;
pub use options::{CreateOptions, LockCallback, PollingOptions, UpdateOptions};
pub use session::{with_stateful_session, StatefulSession};
