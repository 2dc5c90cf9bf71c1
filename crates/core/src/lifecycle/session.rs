//! Scoped stateful session
//!
//! SAP keeps a lock only while the session that took it stays stateful.
//! [`StatefulSession`] switches the connection to stateful on creation and
//! back to stateless when dropped, so every exit path (success, `?`, panic
//! unwinding) restores the stateless default.

use std::sync::Arc;

use adtkit_domain::SessionType;
use tracing::debug;

use crate::adt_ports::AdtConnection;

/// RAII guard for the stateful span between lock and unlock
#[must_use = "the session returns to stateless as soon as the guard is dropped"]
pub struct StatefulSession {
    connection: Arc<dyn AdtConnection>,
}

impl StatefulSession {
    /// Switch `connection` to stateful until the guard is dropped.
    pub fn begin(connection: Arc<dyn AdtConnection>) -> Self {
        connection.set_session_type(SessionType::Stateful);
        debug!(session_id = ?connection.session_id(), "stateful session started");
        Self { connection }
    }

    /// Connection the guard is holding stateful.
    pub fn connection(&self) -> &dyn AdtConnection {
        self.connection.as_ref()
    }

    /// End the stateful span now.
    pub fn end(self) {
        drop(self);
    }
}

impl Drop for StatefulSession {
    fn drop(&mut self) {
        self.connection.set_session_type(SessionType::Stateless);
        debug!(session_id = ?self.connection.session_id(), "stateful session ended");
    }
}

/// Run `operation` inside a stateful session.
///
/// The session is restored to stateless once the future completes, whether
/// it succeeded or not.
pub async fn with_stateful_session<T, F, Fut>(connection: Arc<dyn AdtConnection>, operation: F) -> T
where
    F: FnOnce(Arc<dyn AdtConnection>) -> Fut,
    Fut: std::future::Future<Output = T>,
{
    let session = StatefulSession::begin(connection.clone());
    let output = operation(connection).await;
    session.end();
    output
}
