//! Function groups (`FUGR/F`)
//!
//! A function group has no main source of its own; an update rewrites its
//! object document. Until the first function module exists, SAP's check
//! reports errors for the empty group, which are ignored here.

use adtkit_core::{ObjectAdapter, ObjectBuilder};
use adtkit_domain::constants::{BENIGN_CHECK_MESSAGES, EMPTY_FUNCTION_GROUP_MESSAGES};
use adtkit_domain::{AdtRequest, FunctionGroupConfig, ObjectKind, Result};

use super::spec::{AdtObject, ObjectSpec, UpdatePayload};
use super::{core_attributes, object_functions, package_ref, validation_request};

pub const FUNCTION_GROUPS_PATH: &str = "/sap/bc/adt/functions/groups";
pub const FUNCTION_VALIDATION_PATH: &str = "/sap/bc/adt/functions/validation";
pub const CONTENT_TYPE_FUNCTION_GROUP: &str = "application/vnd.sap.adt.functions.groups.v3+xml";

#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionGroups;

pub type FunctionGroupOperations = AdtObject<FunctionGroups>;
pub type AdtFunctionGroup = ObjectAdapter<FunctionGroupOperations>;
pub type FunctionGroupBuilder = ObjectBuilder<FunctionGroupOperations>;

impl ObjectSpec for FunctionGroups {
    type Config = FunctionGroupConfig;

    const KIND: ObjectKind = ObjectKind::FunctionGroup;
    const CONTENT_TYPE: &'static str = CONTENT_TYPE_FUNCTION_GROUP;

    fn collection_uri(_config: &FunctionGroupConfig) -> String {
        FUNCTION_GROUPS_PATH.to_string()
    }

    fn create_body(config: &FunctionGroupConfig) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<group:abapFunctionGroup xmlns:group="http://www.sap.com/adt/functions/groups" xmlns:adtcore="http://www.sap.com/adt/core" {attributes}>
  {package}
</group:abapFunctionGroup>"#,
            attributes = core_attributes(
                config,
                Self::KIND,
                &config.master_language,
                config.responsible.as_deref()
            ),
            package = package_ref(config),
        )
    }

    fn validation_request(config: &FunctionGroupConfig) -> AdtRequest {
        validation_request(FUNCTION_VALIDATION_PATH, config, Self::KIND)
    }

    fn benign_messages() -> Vec<&'static str> {
        BENIGN_CHECK_MESSAGES.iter().chain(EMPTY_FUNCTION_GROUP_MESSAGES).copied().collect()
    }

    fn update_payload(config: &FunctionGroupConfig) -> Result<UpdatePayload<'_>> {
        Ok(UpdatePayload::Metadata(Self::create_body(config)))
    }
}

object_functions!(FunctionGroups, FunctionGroupConfig {
    validate: validate_function_group_name,
    create: create_function_group,
    read: get_function_group_metadata,
    read_source: read_function_group_source,
    lock: lock_function_group,
    unlock: unlock_function_group,
    update: update_function_group,
    check: check_function_group,
    activate: activate_function_group,
    check_deletion: check_function_group_deletion,
    delete: delete_function_group,
});
