//! Interfaces (`INTF/OI`)

use adtkit_core::{ObjectAdapter, ObjectBuilder};
use adtkit_domain::{AdtRequest, InterfaceConfig, ObjectKind};

use super::class::OO_VALIDATION_PATH;
use super::spec::{AdtObject, ObjectSpec};
use super::{core_attributes, object_functions, package_ref, validation_request};

pub const INTERFACES_PATH: &str = "/sap/bc/adt/oo/interfaces";
pub const CONTENT_TYPE_INTERFACE: &str = "application/vnd.sap.adt.oo.interfaces.v5+xml";

#[derive(Debug, Clone, Copy, Default)]
pub struct Interfaces;

pub type InterfaceOperations = AdtObject<Interfaces>;
pub type AdtInterface = ObjectAdapter<InterfaceOperations>;
pub type InterfaceBuilder = ObjectBuilder<InterfaceOperations>;

impl ObjectSpec for Interfaces {
    type Config = InterfaceConfig;

    const KIND: ObjectKind = ObjectKind::Interface;
    const CONTENT_TYPE: &'static str = CONTENT_TYPE_INTERFACE;

    fn collection_uri(_config: &InterfaceConfig) -> String {
        INTERFACES_PATH.to_string()
    }

    fn create_body(config: &InterfaceConfig) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<intf:abapInterface xmlns:intf="http://www.sap.com/adt/oo/interfaces" xmlns:adtcore="http://www.sap.com/adt/core" {attributes}>
  {package}
</intf:abapInterface>"#,
            attributes = core_attributes(
                config,
                Self::KIND,
                &config.master_language,
                config.responsible.as_deref()
            ),
            package = package_ref(config),
        )
    }

    fn validation_request(config: &InterfaceConfig) -> AdtRequest {
        validation_request(OO_VALIDATION_PATH, config, Self::KIND)
    }
}

object_functions!(Interfaces, InterfaceConfig {
    validate: validate_interface_name,
    create: create_interface,
    read: get_interface_metadata,
    read_source: read_interface_source,
    lock: lock_interface,
    unlock: unlock_interface,
    update: update_interface_source,
    check: check_interface,
    activate: activate_interface,
    check_deletion: check_interface_deletion,
    delete: delete_interface,
});
