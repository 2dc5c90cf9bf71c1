//! ABAP repository object kinds
//!
//! One module per kind. Each exposes named low-level functions
//! (`create_program`, `lock_function_group`, ...), the lifecycle adapter
//! alias (`AdtProgram`) and the builder alias (`ProgramBuilder`).

pub mod behavior_definition;
pub mod class;
pub mod function_group;
pub mod function_module;
pub mod interface;
pub mod program;
pub mod spec;
pub mod structure;
pub mod table;

pub use behavior_definition::{AdtBehaviorDefinition, BehaviorDefinitionBuilder, BehaviorDefinitions};
pub use class::{AdtClass, ClassBuilder, Classes};
pub use function_group::{AdtFunctionGroup, FunctionGroupBuilder, FunctionGroups};
pub use function_module::{AdtFunctionModule, FunctionModuleBuilder, FunctionModules};
pub use interface::{AdtInterface, InterfaceBuilder, Interfaces};
pub use program::{AdtProgram, ProgramBuilder, Programs};
pub use spec::{AdtObject, ObjectSpec, UpdatePayload};
pub use structure::{AdtStructure, StructureBuilder, Structures};
pub use table::{AdtTable, TableBuilder, Tables};

use adtkit_domain::{AdtRequest, ObjectConfig, ObjectKind};

use crate::xml::escape;

/// `adtcore:*` attributes shared by every creation document.
pub(crate) fn core_attributes(
    config: &impl ObjectConfig,
    kind: ObjectKind,
    master_language: &str,
    responsible: Option<&str>,
) -> String {
    let mut attributes = format!(
        r#"adtcore:description="{}" adtcore:name="{}" adtcore:type="{}" adtcore:masterLanguage="{}""#,
        escape(config.description()),
        escape(config.name()),
        kind.adt_type(),
        escape(master_language),
    );
    if let Some(user) = responsible {
        attributes.push_str(&format!(r#" adtcore:responsible="{}""#, escape(user)));
    }
    attributes
}

pub(crate) fn package_ref(config: &impl ObjectConfig) -> String {
    format!(r#"<adtcore:packageRef adtcore:name="{}"/>"#, escape(config.package_name()))
}

/// `POST {path}?objtype=..&objname=..&packagename=..&description=..`
pub(crate) fn validation_request(
    path: &str,
    config: &impl ObjectConfig,
    kind: ObjectKind,
) -> AdtRequest {
    AdtRequest::post(path)
        .query("objtype", kind.adt_type())
        .query("objname", config.name())
        .query("packagename", config.package_name())
        .query("description", config.description())
}

/// Named low-level functions for one kind, all delegating to the generic
/// implementations in [`spec`].
macro_rules! object_functions {
    (
        $spec:ty, $config:ty {
            validate: $validate:ident,
            create: $create:ident,
            read: $read:ident,
            read_source: $read_source:ident,
            lock: $lock:ident,
            unlock: $unlock:ident,
            update: $update:ident,
            check: $check:ident,
            activate: $activate:ident,
            check_deletion: $check_deletion:ident,
            delete: $delete:ident $(,)?
        }
    ) => {
        pub async fn $validate(
            connection: &dyn adtkit_core::AdtConnection,
            config: &$config,
        ) -> adtkit_domain::Result<adtkit_domain::ValidationOutcome> {
            $crate::objects::spec::validate::<$spec>(connection, config).await
        }

        pub async fn $create(
            connection: &dyn adtkit_core::AdtConnection,
            config: &$config,
        ) -> adtkit_domain::Result<adtkit_domain::AdtResponse> {
            $crate::objects::spec::create::<$spec>(connection, config).await
        }

        pub async fn $read(
            connection: &dyn adtkit_core::AdtConnection,
            config: &$config,
        ) -> adtkit_domain::Result<adtkit_domain::AdtResponse> {
            $crate::objects::spec::read_metadata::<$spec>(connection, config).await
        }

        pub async fn $read_source(
            connection: &dyn adtkit_core::AdtConnection,
            config: &$config,
            version: adtkit_domain::CheckVersion,
        ) -> adtkit_domain::Result<String> {
            $crate::objects::spec::read_source::<$spec>(connection, config, version).await
        }

        pub async fn $lock(
            connection: &dyn adtkit_core::AdtConnection,
            config: &$config,
        ) -> adtkit_domain::Result<adtkit_domain::LockResult> {
            $crate::objects::spec::lock::<$spec>(connection, config).await
        }

        pub async fn $unlock(
            connection: &dyn adtkit_core::AdtConnection,
            config: &$config,
            handle: &adtkit_domain::LockHandle,
        ) -> adtkit_domain::Result<adtkit_domain::AdtResponse> {
            $crate::objects::spec::unlock::<$spec>(connection, config, handle).await
        }

        pub async fn $update(
            connection: &dyn adtkit_core::AdtConnection,
            config: &$config,
            handle: &adtkit_domain::LockHandle,
        ) -> adtkit_domain::Result<adtkit_domain::AdtResponse> {
            $crate::objects::spec::update::<$spec>(connection, config, handle).await
        }

        pub async fn $check(
            connection: &dyn adtkit_core::AdtConnection,
            config: &$config,
            version: adtkit_domain::CheckVersion,
            source: Option<&str>,
        ) -> adtkit_domain::Result<adtkit_domain::CheckReport> {
            $crate::objects::spec::check::<$spec>(connection, config, version, source).await
        }

        pub async fn $activate(
            connection: &dyn adtkit_core::AdtConnection,
            config: &$config,
        ) -> adtkit_domain::Result<adtkit_domain::ActivationResult> {
            $crate::objects::spec::activate::<$spec>(connection, config).await
        }

        pub async fn $check_deletion(
            connection: &dyn adtkit_core::AdtConnection,
            config: &$config,
        ) -> adtkit_domain::Result<adtkit_domain::AdtResponse> {
            $crate::objects::spec::check_deletion::<$spec>(connection, config).await
        }

        pub async fn $delete(
            connection: &dyn adtkit_core::AdtConnection,
            config: &$config,
        ) -> adtkit_domain::Result<adtkit_domain::AdtResponse> {
            $crate::objects::spec::delete::<$spec>(connection, config).await
        }
    };
}

pub(crate) use object_functions;
