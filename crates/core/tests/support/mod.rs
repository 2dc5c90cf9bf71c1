//! Shared test helpers for `adtkit-core` integration tests.
//!
//! An in-memory connection that tracks session mode, and scripted object
//! operations that record every call together with the session mode it ran
//! under. Failures are injected per step.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use adtkit_core::{AdtConnection, ObjectOperations, TransportService};
use adtkit_domain::{
    ActivationResult, AdtError, AdtRequest, AdtResponse, CheckReport, CheckVersion, LockHandle,
    ObjectConfig, ObjectKind, OperationMethod, Result, SessionType, TransportConfig,
    TransportRequest, ValidationOutcome,
};
use async_trait::async_trait;
use parking_lot::Mutex;

pub const LOCK_HANDLE: &str = "LH-0001";

/// Connection double that only tracks session mode transitions.
#[derive(Default)]
pub struct MockConnection {
    session_type: Mutex<SessionType>,
    transitions: Mutex<Vec<SessionType>>,
    requests: Mutex<Vec<AdtRequest>>,
}

impl MockConnection {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every `set_session_type` call, in order.
    pub fn transitions(&self) -> Vec<SessionType> {
        self.transitions.lock().clone()
    }
}

#[async_trait]
impl AdtConnection for MockConnection {
    async fn make_adt_request(&self, request: AdtRequest) -> Result<AdtResponse> {
        self.requests.lock().push(request);
        Ok(AdtResponse::new(200, ""))
    }

    fn set_session_type(&self, session_type: SessionType) {
        *self.session_type.lock() = session_type;
        self.transitions.lock().push(session_type);
    }

    fn session_type(&self) -> SessionType {
        *self.session_type.lock()
    }

    fn session_id(&self) -> Option<String> {
        Some("mock-session".to_string())
    }

    async fn connect(&self) -> Result<()> {
        Ok(())
    }

    fn reset(&self) {
        *self.session_type.lock() = SessionType::Stateless;
    }

    fn base_url(&self) -> String {
        "http://sap.invalid:8000".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConfig {
    pub name: String,
    pub package_name: String,
    pub description: String,
    pub transport_request: Option<String>,
    pub source_code: Option<String>,
}

impl TestConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            package_name: "ZPKG".to_string(),
            description: "Test object".to_string(),
            transport_request: None,
            source_code: None,
        }
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source_code = Some(source.to_string());
        self
    }
}

impl ObjectConfig for TestConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn package_name(&self) -> &str {
        &self.package_name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn transport_request(&self) -> Option<&str> {
        self.transport_request.as_deref()
    }

    fn set_transport_request(&mut self, transport_request: Option<String>) {
        self.transport_request = transport_request;
    }

    fn source_code(&self) -> Option<&str> {
        self.source_code.as_deref()
    }
}

/// One recorded operation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: OperationMethod,
    pub session: SessionType,
    /// Source passed to `check`, if any
    pub source: Option<String>,
    /// Transport request on the config at call time
    pub transport: Option<String>,
}

/// Scripted `ObjectOperations` double.
#[derive(Clone, Default)]
pub struct ScriptedOperations {
    calls: Arc<Mutex<Vec<Call>>>,
    /// Per step: calls to let through before failing, and the error
    failures: Arc<Mutex<HashMap<OperationMethod, (usize, AdtError)>>>,
    /// Per step: calls still to fail before the step recovers
    transient: Arc<Mutex<HashMap<OperationMethod, (usize, AdtError)>>>,
    /// Number of reads answered with NotFound before reads succeed
    pending_reads: Arc<Mutex<usize>>,
}

impl ScriptedOperations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call of `method` fail with `error`.
    pub fn fail_on(self, method: OperationMethod, error: AdtError) -> Self {
        self.fail_after(method, 0, error)
    }

    /// Let `successes` calls of `method` through, then fail every later one.
    pub fn fail_after(self, method: OperationMethod, successes: usize, error: AdtError) -> Self {
        self.failures.lock().insert(method, (successes, error));
        self
    }

    /// Fail the first `failures` calls of `method`, then let later ones through.
    pub fn fail_first(self, method: OperationMethod, failures: usize, error: AdtError) -> Self {
        self.transient.lock().insert(method, (failures, error));
        self
    }

    pub fn not_found_reads(self, count: usize) -> Self {
        *self.pending_reads.lock() = count;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn methods(&self) -> Vec<OperationMethod> {
        self.calls.lock().iter().map(|call| call.method).collect()
    }

    pub fn count(&self, method: OperationMethod) -> usize {
        self.calls.lock().iter().filter(|call| call.method == method).count()
    }

    fn enter(
        &self,
        method: OperationMethod,
        connection: &dyn AdtConnection,
        config: &TestConfig,
        source: Option<&str>,
    ) -> Result<()> {
        self.calls.lock().push(Call {
            method,
            session: connection.session_type(),
            source: source.map(str::to_string),
            transport: config.transport_request.clone(),
        });
        if let Some((remaining, error)) = self.transient.lock().get_mut(&method) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(error.clone());
            }
        }
        match self.failures.lock().get_mut(&method) {
            Some((0, error)) => Err(error.clone()),
            Some((remaining, _)) => {
                *remaining -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

pub fn ok_response() -> AdtResponse {
    AdtResponse::new(200, "")
}

#[async_trait]
impl ObjectOperations for ScriptedOperations {
    type Config = TestConfig;

    fn kind(&self) -> ObjectKind {
        ObjectKind::Program
    }

    async fn validate(
        &self,
        connection: &dyn AdtConnection,
        config: &TestConfig,
    ) -> Result<ValidationOutcome> {
        self.enter(OperationMethod::Validate, connection, config, None)?;
        Ok(ValidationOutcome { severity: "OK".to_string(), ..Default::default() })
    }

    async fn create(
        &self,
        connection: &dyn AdtConnection,
        config: &TestConfig,
    ) -> Result<AdtResponse> {
        self.enter(OperationMethod::Create, connection, config, None)?;
        Ok(AdtResponse::new(201, ""))
    }

    async fn read(&self, connection: &dyn AdtConnection, config: &TestConfig) -> Result<AdtResponse> {
        self.enter(OperationMethod::Read, connection, config, None)?;
        let mut pending = self.pending_reads.lock();
        if *pending > 0 {
            *pending -= 1;
            return Err(AdtError::NotFound(config.name.clone()));
        }
        Ok(ok_response())
    }

    async fn read_source(
        &self,
        connection: &dyn AdtConnection,
        config: &TestConfig,
        _version: CheckVersion,
    ) -> Result<String> {
        self.enter(OperationMethod::ReadSource, connection, config, None)?;
        Ok(config.source_code.clone().unwrap_or_default())
    }

    async fn lock(&self, connection: &dyn AdtConnection, config: &TestConfig) -> Result<LockHandle> {
        self.enter(OperationMethod::Lock, connection, config, None)?;
        Ok(LockHandle::new(LOCK_HANDLE))
    }

    async fn unlock(
        &self,
        connection: &dyn AdtConnection,
        config: &TestConfig,
        handle: &LockHandle,
    ) -> Result<AdtResponse> {
        assert_eq!(handle.as_str(), LOCK_HANDLE);
        self.enter(OperationMethod::Unlock, connection, config, None)?;
        Ok(ok_response())
    }

    async fn update(
        &self,
        connection: &dyn AdtConnection,
        config: &TestConfig,
        handle: &LockHandle,
    ) -> Result<AdtResponse> {
        assert_eq!(handle.as_str(), LOCK_HANDLE);
        self.enter(OperationMethod::Update, connection, config, None)?;
        Ok(ok_response())
    }

    async fn check(
        &self,
        connection: &dyn AdtConnection,
        config: &TestConfig,
        _version: CheckVersion,
        source: Option<&str>,
    ) -> Result<CheckReport> {
        self.enter(OperationMethod::Check, connection, config, source)?;
        Ok(CheckReport::default())
    }

    async fn activate(
        &self,
        connection: &dyn AdtConnection,
        config: &TestConfig,
    ) -> Result<ActivationResult> {
        self.enter(OperationMethod::Activate, connection, config, None)?;
        Ok(ActivationResult { activated: true, checked: true, generated: true, messages: vec![] })
    }

    async fn check_deletion(
        &self,
        connection: &dyn AdtConnection,
        config: &TestConfig,
    ) -> Result<AdtResponse> {
        self.enter(OperationMethod::CheckDeletion, connection, config, None)?;
        Ok(ok_response())
    }

    async fn delete(
        &self,
        connection: &dyn AdtConnection,
        config: &TestConfig,
    ) -> Result<AdtResponse> {
        self.enter(OperationMethod::Delete, connection, config, None)?;
        Ok(ok_response())
    }
}

/// Transport service double returning a fixed request number.
pub struct FixedTransports {
    pub number: String,
}

#[async_trait]
impl TransportService for FixedTransports {
    async fn create_transport(
        &self,
        _connection: &dyn AdtConnection,
        config: &TransportConfig,
    ) -> Result<TransportRequest> {
        let mut request = TransportRequest::new(self.number.clone());
        request.description = Some(config.description.clone());
        Ok(request)
    }

    async fn read_transport(
        &self,
        _connection: &dyn AdtConnection,
        number: &str,
    ) -> Result<TransportRequest> {
        Ok(TransportRequest::new(number))
    }
}

pub fn sap_error(message: &str) -> AdtError {
    AdtError::Sap { status: 400, exception_type: None, message: message.to_string() }
}
