//! DDIC structures (`TABL/DS`)

use adtkit_core::{ObjectAdapter, ObjectBuilder};
use adtkit_domain::{AdtRequest, ObjectKind, StructureConfig};

use super::spec::{AdtObject, ObjectSpec};
use super::{core_attributes, object_functions, package_ref, validation_request};

pub const STRUCTURES_PATH: &str = "/sap/bc/adt/ddic/structures";
pub const STRUCTURE_VALIDATION_PATH: &str = "/sap/bc/adt/ddic/structures/validation";
pub const CONTENT_TYPE_STRUCTURE: &str = "application/vnd.sap.adt.structures.v2+xml";

#[derive(Debug, Clone, Copy, Default)]
pub struct Structures;

pub type StructureOperations = AdtObject<Structures>;
pub type AdtStructure = ObjectAdapter<StructureOperations>;
pub type StructureBuilder = ObjectBuilder<StructureOperations>;

impl ObjectSpec for Structures {
    type Config = StructureConfig;

    const KIND: ObjectKind = ObjectKind::Structure;
    const CONTENT_TYPE: &'static str = CONTENT_TYPE_STRUCTURE;

    fn collection_uri(_config: &StructureConfig) -> String {
        STRUCTURES_PATH.to_string()
    }

    fn create_body(config: &StructureConfig) -> String {
        blue_source(
            &core_attributes(config, Self::KIND, &config.master_language, config.responsible.as_deref()),
            &package_ref(config),
        )
    }

    fn validation_request(config: &StructureConfig) -> AdtRequest {
        validation_request(STRUCTURE_VALIDATION_PATH, config, Self::KIND)
    }
}

/// `blue:blueSource` creation document used by source-based DDIC and RAP
/// objects.
pub(crate) fn blue_source(attributes: &str, inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<blue:blueSource xmlns:blue="http://www.sap.com/wbobj/blue" xmlns:adtcore="http://www.sap.com/adt/core" {attributes}>
  {inner}
</blue:blueSource>"#
    )
}

object_functions!(Structures, StructureConfig {
    validate: validate_structure_name,
    create: create_structure,
    read: get_structure_metadata,
    read_source: read_structure_source,
    lock: lock_structure,
    unlock: unlock_structure,
    update: update_structure_source,
    check: check_structure,
    activate: activate_structure,
    check_deletion: check_structure_deletion,
    delete: delete_structure,
});
