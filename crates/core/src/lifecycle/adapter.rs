//! Generic create/update/delete chains
//!
//! `ObjectAdapter<K>` runs the fixed ADT operation sequence for any object
//! kind `K`. Kinds only supply endpoints and payloads through
//! [`ObjectOperations`]; ordering, session switching and cleanup live here.
//!
//! Create chain:
//!
//! ```text
//! validate -> create -> [read with polling] -> check(inactive)
//!   -> [lock -> check(inactive, new source) -> update -> unlock]   (source given)
//!   -> check(inactive) -> [activate]                               (activate set)
//! ```
//!
//! The stateful span covers exactly lock..unlock. When a step fails, a held
//! lock is released once, a created object is deleted once when
//! `delete_on_failure` is set, and the original error is returned. Cleanup
//! failures are attached to it as [`AdtError::Cleanup`].

use std::future::Future;
use std::sync::Arc;

use adtkit_domain::{
    ActivationResult, AdtError, AdtResponse, CheckReport, CheckVersion, CleanupFailure,
    CleanupStep, ObjectConfig, OperationMethod, OperationState, Result, ValidationOutcome,
};
use tracing::{debug, info, instrument, warn};

use super::options::{CreateOptions, LockCallback, PollingOptions, UpdateOptions};
use super::session::StatefulSession;
use crate::adt_ports::{AdtConnection, ObjectOperations};

/// Lifecycle driver for one object kind
pub struct ObjectAdapter<K: ObjectOperations> {
    connection: Arc<dyn AdtConnection>,
    operations: K,
}

impl<K: ObjectOperations + Default> ObjectAdapter<K> {
    /// Adapter using the default operations for `K`.
    pub fn for_connection(connection: Arc<dyn AdtConnection>) -> Self {
        Self::new(connection, K::default())
    }
}

impl<K: ObjectOperations> ObjectAdapter<K> {
    pub fn new(connection: Arc<dyn AdtConnection>, operations: K) -> Self {
        Self { connection, operations }
    }

    pub fn connection(&self) -> &Arc<dyn AdtConnection> {
        &self.connection
    }

    pub fn operations(&self) -> &K {
        &self.operations
    }

    /// Run the full create chain.
    #[instrument(skip_all, fields(kind = %self.operations.kind(), object = %config.name()))]
    pub async fn create(
        &self,
        config: &K::Config,
        options: &CreateOptions,
    ) -> Result<OperationState> {
        let mut state = OperationState::new();
        let mut created = false;

        match self.run_create(config, options, &mut state, &mut created).await {
            Ok(()) => {
                info!(activated = state.activate_result.is_some(), "object created");
                Ok(state)
            }
            Err(error) => {
                let mut failures = Vec::new();
                if created && options.delete_on_failure {
                    if let Err(cleanup) = self.delete_after_failure(config).await {
                        failures.push(CleanupFailure::new(CleanupStep::Delete, cleanup));
                    }
                }
                Err(error.with_cleanup_failures(failures))
            }
        }
    }

    async fn run_create(
        &self,
        config: &K::Config,
        options: &CreateOptions,
        state: &mut OperationState,
        created: &mut bool,
    ) -> Result<()> {
        let connection = self.connection.as_ref();

        let validation =
            step(state, OperationMethod::Validate, self.operations.validate(connection, config))
                .await?;
        state.validation_response = Some(validation);

        let response =
            step(state, OperationMethod::Create, self.operations.create(connection, config))
                .await?;
        *created = true;
        state.create_result = Some(response);

        if let Some(polling) = options.poll {
            let read = step(state, OperationMethod::Read, self.read_with_polling(config, polling))
                .await?;
            state.read_result = Some(read);
        }

        let report = step(
            state,
            OperationMethod::Check,
            self.operations.check(connection, config, CheckVersion::Inactive, None),
        )
        .await?;
        state.check_result = Some(report);

        if self.operations.writes_after_create(config) {
            self.edit(config, options.on_lock.as_ref(), state).await?;
        }

        self.finish(config, options.activate, state).await
    }

    /// Run the update chain: lock -> check(new source) -> update -> unlock
    /// -> check -> [activate].
    #[instrument(skip_all, fields(kind = %self.operations.kind(), object = %config.name()))]
    pub async fn update(
        &self,
        config: &K::Config,
        options: &UpdateOptions,
    ) -> Result<OperationState> {
        let mut state = OperationState::new();
        self.edit(config, options.on_lock.as_ref(), &mut state).await?;
        self.finish(config, options.activate, &mut state).await?;
        info!(activated = state.activate_result.is_some(), "object updated");
        Ok(state)
    }

    /// Run the delete chain: check deletion -> delete.
    #[instrument(skip_all, fields(kind = %self.operations.kind(), object = %config.name()))]
    pub async fn delete(&self, config: &K::Config) -> Result<OperationState> {
        let connection = self.connection.as_ref();
        let mut state = OperationState::new();

        step(
            &mut state,
            OperationMethod::CheckDeletion,
            self.operations.check_deletion(connection, config),
        )
        .await?;
        let response =
            step(&mut state, OperationMethod::Delete, self.operations.delete(connection, config))
                .await?;
        state.delete_result = Some(response);

        info!("object deleted");
        Ok(state)
    }

    pub async fn validate(&self, config: &K::Config) -> Result<ValidationOutcome> {
        self.operations.validate(self.connection.as_ref(), config).await
    }

    pub async fn read(&self, config: &K::Config) -> Result<AdtResponse> {
        self.operations.read(self.connection.as_ref(), config).await
    }

    pub async fn read_source(&self, config: &K::Config, version: CheckVersion) -> Result<String> {
        self.operations.read_source(self.connection.as_ref(), config, version).await
    }

    pub async fn check(&self, config: &K::Config, version: CheckVersion) -> Result<CheckReport> {
        self.operations.check(self.connection.as_ref(), config, version, None).await
    }

    pub async fn activate(&self, config: &K::Config) -> Result<ActivationResult> {
        self.operations.activate(self.connection.as_ref(), config).await
    }

    /// Read metadata, retrying while SAP still reports the object missing.
    pub async fn read_with_polling(
        &self,
        config: &K::Config,
        polling: PollingOptions,
    ) -> Result<AdtResponse> {
        let attempts = polling.attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.operations.read(self.connection.as_ref(), config).await {
                Ok(response) => return Ok(response),
                Err(error) if error.is_not_found() && attempt < attempts => {
                    debug!(attempt, attempts, "object not readable yet");
                    tokio::time::sleep(polling.interval).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// lock -> check(inactive, new source) -> update -> unlock, inside one
    /// stateful session.
    async fn edit(
        &self,
        config: &K::Config,
        on_lock: Option<&LockCallback>,
        state: &mut OperationState,
    ) -> Result<()> {
        let session = StatefulSession::begin(self.connection.clone());
        let connection = session.connection();

        let handle =
            step(state, OperationMethod::Lock, self.operations.lock(connection, config)).await?;
        state.lock_handle = Some(handle.clone());
        if let Some(callback) = on_lock {
            callback(&handle);
        }

        let edited = async {
            let report = step(
                state,
                OperationMethod::Check,
                self.operations.check(
                    connection,
                    config,
                    CheckVersion::Inactive,
                    config.source_code(),
                ),
            )
            .await?;
            state.check_result = Some(report);

            let response = step(
                state,
                OperationMethod::Update,
                self.operations.update(connection, config, &handle),
            )
            .await?;
            state.update_result = Some(response);
            Ok::<(), AdtError>(())
        }
        .await;

        let unlocked = step(
            state,
            OperationMethod::Unlock,
            self.operations.unlock(connection, config, &handle),
        )
        .await;
        session.end();

        match (edited, unlocked) {
            (Ok(()), Ok(response)) => {
                state.unlock_result = Some(response);
                state.lock_handle = None;
                Ok(())
            }
            (Ok(()), Err(error)) => Err(error),
            (Err(primary), Ok(response)) => {
                state.unlock_result = Some(response);
                state.lock_handle = None;
                Err(primary)
            }
            (Err(primary), Err(cleanup)) => {
                warn!(error = %cleanup, "unlock after failed edit did not succeed");
                Err(primary
                    .with_cleanup_failures(vec![CleanupFailure::new(CleanupStep::Unlock, cleanup)]))
            }
        }
    }

    /// Final inactive check, then activation when requested.
    async fn finish(
        &self,
        config: &K::Config,
        activate: bool,
        state: &mut OperationState,
    ) -> Result<()> {
        let connection = self.connection.as_ref();

        let report = step(
            state,
            OperationMethod::Check,
            self.operations.check(connection, config, CheckVersion::Inactive, None),
        )
        .await?;
        state.check_result = Some(report);

        if activate {
            let result = step(
                state,
                OperationMethod::Activate,
                self.operations.activate(connection, config),
            )
            .await?;
            state.activate_result = Some(result);
        }

        Ok(())
    }

    async fn delete_after_failure(&self, config: &K::Config) -> Result<AdtResponse> {
        debug!("deleting partially created object");
        match self.operations.delete(self.connection.as_ref(), config).await {
            Ok(response) => Ok(response),
            Err(error) => {
                warn!(error = %error, "delete after failed create did not succeed");
                Err(error)
            }
        }
    }
}

/// Await one chain step and record its outcome.
async fn step<T, F>(state: &mut OperationState, method: OperationMethod, operation: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    debug!(step = %method, "running step");
    match operation.await {
        Ok(value) => {
            state.record_success(method);
            Ok(value)
        }
        Err(error) => {
            debug!(step = %method, error = %error, "step failed");
            state.record_error(method, &error);
            Err(error)
        }
    }
}
