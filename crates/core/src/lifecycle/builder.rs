//! Step-by-step fluent driver
//!
//! `ObjectBuilder<K>` exposes each chain step individually. The caller picks
//! the order; the builder keeps the lock handle, the stateful session
//! between `lock` and `unlock`, and the per-step results.
//!
//! ```ignore
//! let mut builder = ObjectBuilder::new(connection, Programs, config);
//! builder.validate().await?.create().await?;
//! builder.lock().await?.update().await?.unlock().await?.activate().await?;
//! ```
//!
//! When a step fails mid-chain, call [`ObjectBuilder::force_unlock`] so a
//! held lock is released and the session returns to stateless.

use std::sync::Arc;

use adtkit_domain::{
    ActivationResult, AdtError, AdtResponse, CheckReport, CheckVersion, CompletedStep, LockHandle,
    ObjectConfig, OperationErrorEntry, OperationMethod, OperationState, Result, TransportConfig,
    TransportRequest, ValidationOutcome,
};
use tracing::{debug, info, warn};

use super::session::StatefulSession;
use crate::adt_ports::{AdtConnection, ObjectOperations, TransportService};

pub struct ObjectBuilder<K: ObjectOperations> {
    connection: Arc<dyn AdtConnection>,
    operations: K,
    config: K::Config,
    state: OperationState,
    session: Option<StatefulSession>,
}

impl<K: ObjectOperations + Default> ObjectBuilder<K> {
    pub fn for_connection(connection: Arc<dyn AdtConnection>, config: K::Config) -> Self {
        Self::new(connection, K::default(), config)
    }
}

impl<K: ObjectOperations> ObjectBuilder<K> {
    pub fn new(connection: Arc<dyn AdtConnection>, operations: K, config: K::Config) -> Self {
        Self { connection, operations, config, state: OperationState::new(), session: None }
    }

    pub fn config(&self) -> &K::Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut K::Config {
        &mut self.config
    }

    pub fn state(&self) -> &OperationState {
        &self.state
    }

    pub fn into_state(self) -> OperationState {
        self.state
    }

    /// Completed steps, in order.
    pub fn results(&self) -> &[CompletedStep] {
        &self.state.completed
    }

    pub fn errors(&self) -> &[OperationErrorEntry] {
        &self.state.errors
    }

    pub fn has_errors(&self) -> bool {
        self.state.has_errors()
    }

    pub fn lock_handle(&self) -> Option<&LockHandle> {
        self.state.lock_handle.as_ref()
    }

    /// Whether the builder currently holds the session stateful.
    pub fn in_stateful_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn validation_response(&self) -> Option<&ValidationOutcome> {
        self.state.validation_response.as_ref()
    }

    pub fn create_result(&self) -> Option<&AdtResponse> {
        self.state.create_result.as_ref()
    }

    pub fn check_result(&self) -> Option<&CheckReport> {
        self.state.check_result.as_ref()
    }

    pub fn update_result(&self) -> Option<&AdtResponse> {
        self.state.update_result.as_ref()
    }

    pub fn unlock_result(&self) -> Option<&AdtResponse> {
        self.state.unlock_result.as_ref()
    }

    pub fn activate_result(&self) -> Option<&ActivationResult> {
        self.state.activate_result.as_ref()
    }

    pub fn delete_result(&self) -> Option<&AdtResponse> {
        self.state.delete_result.as_ref()
    }

    pub fn read_result(&self) -> Option<&AdtResponse> {
        self.state.read_result.as_ref()
    }

    pub fn source_result(&self) -> Option<&str> {
        self.state.source_result.as_deref()
    }

    pub fn transport_result(&self) -> Option<&TransportRequest> {
        self.state.transport_result.as_ref()
    }

    pub async fn validate(&mut self) -> Result<&mut Self> {
        let result = self.operations.validate(self.connection.as_ref(), &self.config).await;
        let outcome = self.record(OperationMethod::Validate, result)?;
        self.state.validation_response = Some(outcome);
        Ok(self)
    }

    pub async fn create(&mut self) -> Result<&mut Self> {
        let result = self.operations.create(self.connection.as_ref(), &self.config).await;
        let response = self.record(OperationMethod::Create, result)?;
        self.state.create_result = Some(response);
        info!(kind = %self.operations.kind(), object = %self.config.name(), "object created");
        Ok(self)
    }

    pub async fn read(&mut self) -> Result<&mut Self> {
        let result = self.operations.read(self.connection.as_ref(), &self.config).await;
        let response = self.record(OperationMethod::Read, result)?;
        self.state.read_result = Some(response);
        Ok(self)
    }

    pub async fn read_source(&mut self, version: CheckVersion) -> Result<&mut Self> {
        let result =
            self.operations.read_source(self.connection.as_ref(), &self.config, version).await;
        let source = self.record(OperationMethod::ReadSource, result)?;
        self.state.source_result = Some(source);
        Ok(self)
    }

    /// Switch to stateful and acquire the edit lock.
    ///
    /// On failure the session goes back to stateless immediately.
    pub async fn lock(&mut self) -> Result<&mut Self> {
        if self.state.lock_handle.is_some() {
            return Err(AdtError::Lock(format!("{} is already locked", self.config.name())));
        }

        let session = StatefulSession::begin(self.connection.clone());
        let result = self.operations.lock(session.connection(), &self.config).await;
        match self.record(OperationMethod::Lock, result) {
            Ok(handle) => {
                debug!(object = %self.config.name(), lock_handle = ?handle, "lock acquired");
                self.state.lock_handle = Some(handle);
                self.session = Some(session);
                Ok(self)
            }
            Err(error) => {
                session.end();
                Err(error)
            }
        }
    }

    /// Check the stored source.
    pub async fn check(&mut self, version: CheckVersion) -> Result<&mut Self> {
        let result =
            self.operations.check(self.connection.as_ref(), &self.config, version, None).await;
        let report = self.record(OperationMethod::Check, result)?;
        self.state.check_result = Some(report);
        Ok(self)
    }

    /// Check the configured source before it is written.
    pub async fn check_new_source(&mut self) -> Result<&mut Self> {
        let result = self
            .operations
            .check(
                self.connection.as_ref(),
                &self.config,
                CheckVersion::Inactive,
                self.config.source_code(),
            )
            .await;
        let report = self.record(OperationMethod::Check, result)?;
        self.state.check_result = Some(report);
        Ok(self)
    }

    /// Write the configured source under the held lock.
    pub async fn update(&mut self) -> Result<&mut Self> {
        let Some(handle) = self.state.lock_handle.clone() else {
            let error = AdtError::InvalidInput(format!(
                "{} must be locked before update",
                self.config.name()
            ));
            self.state.record_error(OperationMethod::Update, &error);
            return Err(error);
        };

        let result = self.operations.update(self.connection.as_ref(), &self.config, &handle).await;
        let response = self.record(OperationMethod::Update, result)?;
        self.state.update_result = Some(response);
        Ok(self)
    }

    /// Release the held lock and return to stateless.
    ///
    /// On failure the handle and the stateful session are kept, so a
    /// retry or [`force_unlock`](Self::force_unlock) still runs inside the
    /// session that owns the lock.
    pub async fn unlock(&mut self) -> Result<&mut Self> {
        let Some(handle) = self.state.lock_handle.clone() else {
            let error = AdtError::InvalidInput(format!("{} is not locked", self.config.name()));
            self.state.record_error(OperationMethod::Unlock, &error);
            return Err(error);
        };

        let result = self.operations.unlock(self.connection.as_ref(), &self.config, &handle).await;
        let response = self.record(OperationMethod::Unlock, result)?;
        self.end_session();
        self.state.lock_handle = None;
        self.state.unlock_result = Some(response);
        Ok(self)
    }

    pub async fn activate(&mut self) -> Result<&mut Self> {
        let result = self.operations.activate(self.connection.as_ref(), &self.config).await;
        let activation = self.record(OperationMethod::Activate, result)?;
        self.state.activate_result = Some(activation);
        Ok(self)
    }

    /// Deletion check followed by delete.
    pub async fn delete(&mut self) -> Result<&mut Self> {
        let result = self.operations.check_deletion(self.connection.as_ref(), &self.config).await;
        self.record(OperationMethod::CheckDeletion, result)?;

        let result = self.operations.delete(self.connection.as_ref(), &self.config).await;
        let response = self.record(OperationMethod::Delete, result)?;
        self.state.delete_result = Some(response);
        info!(kind = %self.operations.kind(), object = %self.config.name(), "object deleted");
        Ok(self)
    }

    /// Best-effort release of a held lock.
    ///
    /// Never fails: an unlock error is logged and recorded, the lock handle
    /// is cleared and the session returns to stateless either way.
    pub async fn force_unlock(&mut self) -> &mut Self {
        if let Some(handle) = self.state.lock_handle.take() {
            let result =
                self.operations.unlock(self.connection.as_ref(), &self.config, &handle).await;
            match result {
                Ok(response) => {
                    self.state.record_success(OperationMethod::ForceUnlock);
                    self.state.unlock_result = Some(response);
                }
                Err(error) => {
                    warn!(object = %self.config.name(), error = %error, "force unlock failed");
                    self.state.record_error(OperationMethod::ForceUnlock, &error);
                }
            }
        }
        self.end_session();
        self
    }

    /// Create a transport request and use it for all following steps.
    pub async fn create_transport(
        &mut self,
        service: &dyn TransportService,
        transport: &TransportConfig,
    ) -> Result<&mut Self> {
        let result = service.create_transport(self.connection.as_ref(), transport).await;
        let request = self.record(OperationMethod::CreateTransport, result)?;
        self.config.set_transport_request(Some(request.number.clone()));
        self.state.transport_result = Some(request);
        Ok(self)
    }

    fn record<T>(&mut self, method: OperationMethod, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                self.state.record_success(method);
                Ok(value)
            }
            Err(error) => {
                debug!(step = %method, error = %error, "builder step failed");
                self.state.record_error(method, &error);
                Err(error)
            }
        }
    }

    fn end_session(&mut self) {
        if let Some(session) = self.session.take() {
            session.end();
        }
    }
}
