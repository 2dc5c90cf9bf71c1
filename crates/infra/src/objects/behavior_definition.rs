//! RAP behavior definitions (`BDEF/BDO`)

use std::borrow::Cow;

use adtkit_core::{ObjectAdapter, ObjectBuilder};
use adtkit_domain::{AdtRequest, BehaviorDefinitionConfig, ObjectKind, Result};

use super::spec::{AdtObject, ObjectSpec, UpdatePayload};
use super::structure::blue_source;
use super::{core_attributes, object_functions, package_ref};
use crate::xml::escape;

pub const BEHAVIOR_DEFINITIONS_PATH: &str = "/sap/bc/adt/bo/behaviordefinitions";
pub const BEHAVIOR_DEFINITION_VALIDATION_PATH: &str =
    "/sap/bc/adt/bo/behaviordefinitions/validation";
pub const CONTENT_TYPE_BEHAVIOR_DEFINITION: &str = "application/vnd.sap.adt.blues.v1+xml";

#[derive(Debug, Clone, Copy, Default)]
pub struct BehaviorDefinitions;

pub type BehaviorDefinitionOperations = AdtObject<BehaviorDefinitions>;
pub type AdtBehaviorDefinition = ObjectAdapter<BehaviorDefinitionOperations>;
pub type BehaviorDefinitionBuilder = ObjectBuilder<BehaviorDefinitionOperations>;

impl ObjectSpec for BehaviorDefinitions {
    type Config = BehaviorDefinitionConfig;

    const KIND: ObjectKind = ObjectKind::BehaviorDefinition;
    const CONTENT_TYPE: &'static str = CONTENT_TYPE_BEHAVIOR_DEFINITION;

    fn collection_uri(_config: &BehaviorDefinitionConfig) -> String {
        BEHAVIOR_DEFINITIONS_PATH.to_string()
    }

    fn create_body(config: &BehaviorDefinitionConfig) -> String {
        let template = format!(
            r#"{package}
  <adtcore:adtTemplate>
    <adtcore:adtProperty adtcore:key="implementation_type">{implementation_type}</adtcore:adtProperty>
    <adtcore:adtProperty adtcore:key="root_entity">{root_entity}</adtcore:adtProperty>
  </adtcore:adtTemplate>"#,
            package = package_ref(config),
            implementation_type = config.implementation_type,
            root_entity = escape(&config.root_entity),
        );
        blue_source(
            &core_attributes(config, Self::KIND, &config.master_language, config.responsible.as_deref()),
            &template,
        )
    }

    fn validation_request(config: &BehaviorDefinitionConfig) -> AdtRequest {
        AdtRequest::post(BEHAVIOR_DEFINITION_VALIDATION_PATH)
            .query("objtype", Self::KIND.adt_type())
            .query("objname", config.name.as_str())
            .query("rootEntity", config.root_entity.as_str())
            .query("packagename", config.package_name.as_str())
            .query("description", config.description.as_str())
            .query("implementationType", config.implementation_type.as_str())
    }

    /// Configs read from files may lack a source; they get the skeleton.
    fn update_payload(config: &BehaviorDefinitionConfig) -> Result<UpdatePayload<'_>> {
        let source = match config.source_code.as_deref() {
            Some(source) => Cow::Borrowed(source),
            None => Cow::Owned(config.skeleton_source()),
        };
        Ok(UpdatePayload::Source(source))
    }
}

object_functions!(BehaviorDefinitions, BehaviorDefinitionConfig {
    validate: validate_behavior_definition_name,
    create: create_behavior_definition,
    read: get_behavior_definition_metadata,
    read_source: read_behavior_definition_source,
    lock: lock_behavior_definition,
    unlock: unlock_behavior_definition,
    update: update_behavior_definition_source,
    check: check_behavior_definition,
    activate: activate_behavior_definition,
    check_deletion: check_behavior_definition_deletion,
    delete: delete_behavior_definition,
});
