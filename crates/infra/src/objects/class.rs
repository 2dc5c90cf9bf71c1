//! Classes (`CLAS/OC`)

use adtkit_core::{ObjectAdapter, ObjectBuilder};
use adtkit_domain::{AdtRequest, ClassConfig, ObjectKind};

use super::spec::{AdtObject, ObjectSpec};
use super::{core_attributes, object_functions, package_ref, validation_request};
use crate::xml::escape;

pub const CLASSES_PATH: &str = "/sap/bc/adt/oo/classes";
pub const OO_VALIDATION_PATH: &str = "/sap/bc/adt/oo/validation/objectname";
pub const CONTENT_TYPE_CLASS: &str = "application/vnd.sap.adt.oo.classes.v4+xml";

#[derive(Debug, Clone, Copy, Default)]
pub struct Classes;

pub type ClassOperations = AdtObject<Classes>;
pub type AdtClass = ObjectAdapter<ClassOperations>;
pub type ClassBuilder = ObjectBuilder<ClassOperations>;

impl ObjectSpec for Classes {
    type Config = ClassConfig;

    const KIND: ObjectKind = ObjectKind::Class;
    const CONTENT_TYPE: &'static str = CONTENT_TYPE_CLASS;

    fn collection_uri(_config: &ClassConfig) -> String {
        CLASSES_PATH.to_string()
    }

    fn create_body(config: &ClassConfig) -> String {
        let superclass = config
            .superclass
            .as_deref()
            .map(|name| format!("\n  <class:superClassRef adtcore:name=\"{}\"/>", escape(name)))
            .unwrap_or_default();

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<class:abapClass xmlns:class="http://www.sap.com/adt/oo/classes" xmlns:adtcore="http://www.sap.com/adt/core" {attributes} class:final="{is_final}" class:visibility="{visibility}">
  {package}{superclass}
</class:abapClass>"#,
            attributes = core_attributes(
                config,
                Self::KIND,
                &config.master_language,
                config.responsible.as_deref()
            ),
            is_final = config.is_final,
            visibility = config.visibility,
            package = package_ref(config),
        )
    }

    fn validation_request(config: &ClassConfig) -> AdtRequest {
        validation_request(OO_VALIDATION_PATH, config, Self::KIND)
    }
}

object_functions!(Classes, ClassConfig {
    validate: validate_class_name,
    create: create_class,
    read: get_class_metadata,
    read_source: read_class_source,
    lock: lock_class,
    unlock: unlock_class,
    update: update_class_source,
    check: check_class,
    activate: activate_class,
    check_deletion: check_class_deletion,
    delete: delete_class,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_references_superclass() {
        let config = ClassConfig::new("zcl_demo", "zpkg", "Demo").with_superclass("cx_static_check");
        let body = Classes::create_body(&config);

        assert!(body.contains(r#"adtcore:type="CLAS/OC""#));
        assert!(body.contains(r#"class:final="true""#));
        assert!(body.contains(r#"class:visibility="public""#));
        assert!(body.contains(r#"<class:superClassRef adtcore:name="CX_STATIC_CHECK"/>"#));
    }

    #[test]
    fn create_body_omits_missing_superclass() {
        let body = Classes::create_body(&ClassConfig::new("zcl_demo", "zpkg", "Demo"));
        assert!(!body.contains("superClassRef"));
    }

    #[test]
    fn namespaced_names_are_encoded() {
        let config = ClassConfig::new("/dmo/cl_flight", "/dmo/flight", "Flights");
        assert_eq!(Classes::object_uri(&config), "/sap/bc/adt/oo/classes/%2Fdmo%2Fcl_flight");
    }
}
