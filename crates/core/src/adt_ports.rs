//! ADT port interfaces
//!
//! The lifecycle driver talks to SAP only through these traits. The HTTP
//! implementation lives in `adtkit-infra`; tests substitute in-memory ones.

use async_trait::async_trait;
use adtkit_domain::{
    ActivationResult, AdtRequest, AdtResponse, CheckReport, CheckVersion, LockHandle,
    ObjectConfig, ObjectKind, Result, SessionType, TransportConfig, TransportRequest,
    ValidationOutcome,
};

/// Connection and session to one SAP system
///
/// Session type is connection-level state: every request sent while the
/// session is stateful carries the stateful marker, so lock, update and
/// unlock share the server-side lock context.
#[async_trait]
pub trait AdtConnection: Send + Sync {
    /// Send one request and return the raw response.
    ///
    /// Non-2xx responses are returned as errors carrying the SAP exception
    /// text.
    async fn make_adt_request(&self, request: AdtRequest) -> Result<AdtResponse>;

    /// Switch the session mode for subsequent requests.
    fn set_session_type(&self, session_type: SessionType);

    /// Current session mode.
    fn session_type(&self) -> SessionType;

    /// Identifier of the current HTTP session, once established.
    fn session_id(&self) -> Option<String>;

    /// Establish the session (CSRF token, cookies).
    async fn connect(&self) -> Result<()>;

    /// Drop session state so the next request starts a fresh session.
    fn reset(&self);

    /// Base URL of the SAP system.
    fn base_url(&self) -> String;
}

/// Per-kind capability interface driven by the generic lifecycle
///
/// Implementations differ only in endpoints and payloads; the order of calls
/// and the session handling belong to the driver.
#[async_trait]
pub trait ObjectOperations: Send + Sync {
    type Config: ObjectConfig;

    /// Object kind handled by this implementation
    fn kind(&self) -> ObjectKind;

    /// Whether a new object gets a locked write right after `create`.
    fn writes_after_create(&self, config: &Self::Config) -> bool {
        config.source_code().is_some()
    }

    /// Ask SAP whether the name/package combination is acceptable.
    async fn validate(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
    ) -> Result<ValidationOutcome>;

    /// Create the (empty) object.
    async fn create(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
    ) -> Result<AdtResponse>;

    /// Read object metadata.
    async fn read(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
    ) -> Result<AdtResponse>;

    /// Read the main source, if the kind has one.
    async fn read_source(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
        version: CheckVersion,
    ) -> Result<String>;

    /// Acquire an edit lock; must run inside a stateful session.
    async fn lock(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
    ) -> Result<LockHandle>;

    /// Release the lock identified by `handle`.
    async fn unlock(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
        handle: &LockHandle,
    ) -> Result<AdtResponse>;

    /// Write the configured source (or metadata) under `handle`.
    async fn update(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
        handle: &LockHandle,
    ) -> Result<AdtResponse>;

    /// Syntax check. `source` is checked in place of the stored source when
    /// given. Fails when errors remain after benign messages are dropped.
    async fn check(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
        version: CheckVersion,
        source: Option<&str>,
    ) -> Result<CheckReport>;

    /// Activate the inactive version.
    async fn activate(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
    ) -> Result<ActivationResult>;

    /// Ask SAP whether the object may be deleted.
    async fn check_deletion(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
    ) -> Result<AdtResponse>;

    /// Delete the object.
    async fn delete(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
    ) -> Result<AdtResponse>;
}

/// Transport organizer operations
#[async_trait]
pub trait TransportService: Send + Sync {
    /// Create a new transport request.
    async fn create_transport(
        &self,
        connection: &dyn AdtConnection,
        config: &TransportConfig,
    ) -> Result<TransportRequest>;

    /// Read an existing transport request.
    async fn read_transport(
        &self,
        connection: &dyn AdtConnection,
        number: &str,
    ) -> Result<TransportRequest>;
}
