//! Kind description and the generic `ObjectOperations` implementation
//!
//! Every kind is a zero-sized marker implementing [`ObjectSpec`]: it names
//! the collection, creation document and validation endpoint. The shared
//! request logic lives once in the generic functions below and in
//! [`AdtObject`], which plugs a spec into the core lifecycle driver.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use adtkit_core::{AdtConnection, ObjectOperations};
use adtkit_domain::constants::BENIGN_CHECK_MESSAGES;
use adtkit_domain::{
    ActivationResult, AdtError, AdtRequest, AdtResponse, CheckReport, CheckVersion, LockHandle,
    LockResult, ObjectConfig, ObjectKind, ObjectReference, Result, ValidationOutcome,
};
use async_trait::async_trait;

use crate::operations;

/// What an update writes while the object is locked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatePayload<'a> {
    /// Plain-text main source, `PUT {source_uri}`
    Source(Cow<'a, str>),
    /// Object document, `PUT {object_uri}`
    Metadata(String),
}

/// Endpoints and payloads of one object kind
pub trait ObjectSpec: Send + Sync + 'static {
    type Config: ObjectConfig;

    const KIND: ObjectKind;

    /// Content type of the creation document and of metadata reads
    const CONTENT_TYPE: &'static str;

    /// Collection the object is created in.
    fn collection_uri(config: &Self::Config) -> String;

    fn object_uri(config: &Self::Config) -> String {
        operations::object_uri(&Self::collection_uri(config), config.name())
    }

    fn source_uri(config: &Self::Config) -> String {
        format!("{}/source/main", Self::object_uri(config))
    }

    /// Creation document posted to the collection.
    fn create_body(config: &Self::Config) -> String;

    /// Kind-specific name validation request.
    fn validation_request(config: &Self::Config) -> AdtRequest;

    /// Check messages that never indicate a defect in this kind.
    fn benign_messages() -> Vec<&'static str> {
        BENIGN_CHECK_MESSAGES.to_vec()
    }

    fn writes_after_create(config: &Self::Config) -> bool {
        config.source_code().is_some()
    }

    fn update_payload(config: &Self::Config) -> Result<UpdatePayload<'_>> {
        config.source_code().map(|source| UpdatePayload::Source(Cow::Borrowed(source))).ok_or_else(
            || {
                AdtError::InvalidInput(format!(
                    "{} {} has no source to write",
                    Self::KIND,
                    config.name()
                ))
            },
        )
    }

    fn reference(config: &Self::Config) -> ObjectReference {
        ObjectReference::new(Self::object_uri(config), config.name(), Self::KIND)
    }
}

pub async fn validate<T: ObjectSpec>(
    connection: &dyn AdtConnection,
    config: &T::Config,
) -> Result<ValidationOutcome> {
    operations::validate_object_name(connection, config.name(), T::validation_request(config))
        .await
}

pub async fn create<T: ObjectSpec>(
    connection: &dyn AdtConnection,
    config: &T::Config,
) -> Result<AdtResponse> {
    operations::create_object(
        connection,
        &T::collection_uri(config),
        T::CONTENT_TYPE,
        T::create_body(config),
        config.transport_request(),
    )
    .await
}

pub async fn read_metadata<T: ObjectSpec>(
    connection: &dyn AdtConnection,
    config: &T::Config,
) -> Result<AdtResponse> {
    operations::read_metadata(connection, &T::object_uri(config), T::CONTENT_TYPE).await
}

pub async fn read_source<T: ObjectSpec>(
    connection: &dyn AdtConnection,
    config: &T::Config,
    version: CheckVersion,
) -> Result<String> {
    operations::read_source(connection, &T::source_uri(config), version).await
}

pub async fn lock<T: ObjectSpec>(
    connection: &dyn AdtConnection,
    config: &T::Config,
) -> Result<LockResult> {
    operations::lock_object(connection, &T::object_uri(config)).await
}

pub async fn unlock<T: ObjectSpec>(
    connection: &dyn AdtConnection,
    config: &T::Config,
    handle: &LockHandle,
) -> Result<AdtResponse> {
    operations::unlock_object(connection, &T::object_uri(config), handle).await
}

pub async fn update<T: ObjectSpec>(
    connection: &dyn AdtConnection,
    config: &T::Config,
    handle: &LockHandle,
) -> Result<AdtResponse> {
    match T::update_payload(config)? {
        UpdatePayload::Source(source) => {
            operations::update_source(
                connection,
                &T::source_uri(config),
                handle,
                config.transport_request(),
                &source,
            )
            .await
        }
        UpdatePayload::Metadata(body) => {
            operations::update_metadata(
                connection,
                &T::object_uri(config),
                handle,
                config.transport_request(),
                T::CONTENT_TYPE,
                body,
            )
            .await
        }
    }
}

/// Syntax check with the kind's benign messages removed.
pub async fn check<T: ObjectSpec>(
    connection: &dyn AdtConnection,
    config: &T::Config,
    version: CheckVersion,
    source: Option<&str>,
) -> Result<CheckReport> {
    operations::check_object(
        connection,
        config.name(),
        &T::object_uri(config),
        &T::source_uri(config),
        version,
        source,
        &T::benign_messages(),
    )
    .await
}

pub async fn activate<T: ObjectSpec>(
    connection: &dyn AdtConnection,
    config: &T::Config,
) -> Result<ActivationResult> {
    operations::activate_object(connection, &T::reference(config)).await
}

pub async fn check_deletion<T: ObjectSpec>(
    connection: &dyn AdtConnection,
    config: &T::Config,
) -> Result<AdtResponse> {
    operations::check_deletion(connection, &T::object_uri(config)).await
}

pub async fn delete<T: ObjectSpec>(
    connection: &dyn AdtConnection,
    config: &T::Config,
) -> Result<AdtResponse> {
    operations::delete_object(connection, &T::object_uri(config), config.transport_request())
        .await
}

/// [`ObjectOperations`] for the kind described by `T`
pub struct AdtObject<T>(PhantomData<fn() -> T>);

impl<T> AdtObject<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for AdtObject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for AdtObject<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: ObjectSpec> fmt::Debug for AdtObject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AdtObject").field(&T::KIND).finish()
    }
}

#[async_trait]
impl<T: ObjectSpec> ObjectOperations for AdtObject<T> {
    type Config = T::Config;

    fn kind(&self) -> ObjectKind {
        T::KIND
    }

    fn writes_after_create(&self, config: &Self::Config) -> bool {
        T::writes_after_create(config)
    }

    async fn validate(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
    ) -> Result<ValidationOutcome> {
        validate::<T>(connection, config).await
    }

    async fn create(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
    ) -> Result<AdtResponse> {
        create::<T>(connection, config).await
    }

    async fn read(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
    ) -> Result<AdtResponse> {
        read_metadata::<T>(connection, config).await
    }

    async fn read_source(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
        version: CheckVersion,
    ) -> Result<String> {
        read_source::<T>(connection, config, version).await
    }

    async fn lock(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
    ) -> Result<LockHandle> {
        Ok(lock::<T>(connection, config).await?.handle)
    }

    async fn unlock(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
        handle: &LockHandle,
    ) -> Result<AdtResponse> {
        unlock::<T>(connection, config, handle).await
    }

    async fn update(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
        handle: &LockHandle,
    ) -> Result<AdtResponse> {
        update::<T>(connection, config, handle).await
    }

    async fn check(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
        version: CheckVersion,
        source: Option<&str>,
    ) -> Result<CheckReport> {
        check::<T>(connection, config, version, source).await
    }

    async fn activate(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
    ) -> Result<ActivationResult> {
        activate::<T>(connection, config).await
    }

    async fn check_deletion(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
    ) -> Result<AdtResponse> {
        check_deletion::<T>(connection, config).await
    }

    async fn delete(
        &self,
        connection: &dyn AdtConnection,
        config: &Self::Config,
    ) -> Result<AdtResponse> {
        delete::<T>(connection, config).await
    }
}
