//! Function modules (`FUGR/FF`), created inside their function group

use adtkit_core::{ObjectAdapter, ObjectBuilder};
use adtkit_domain::{AdtRequest, FunctionModuleConfig, ObjectKind};

use super::function_group::{FUNCTION_GROUPS_PATH, FUNCTION_VALIDATION_PATH};
use super::spec::{AdtObject, ObjectSpec};
use super::{core_attributes, object_functions, package_ref};
use crate::operations::object_uri;
use crate::xml::escape;

pub const CONTENT_TYPE_FUNCTION_MODULE: &str =
    "application/vnd.sap.adt.functions.fmodules.v3+xml";

#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionModules;

pub type FunctionModuleOperations = AdtObject<FunctionModules>;
pub type AdtFunctionModule = ObjectAdapter<FunctionModuleOperations>;
pub type FunctionModuleBuilder = ObjectBuilder<FunctionModuleOperations>;

fn group_uri(config: &FunctionModuleConfig) -> String {
    object_uri(FUNCTION_GROUPS_PATH, &config.function_group)
}

impl ObjectSpec for FunctionModules {
    type Config = FunctionModuleConfig;

    const KIND: ObjectKind = ObjectKind::FunctionModule;
    const CONTENT_TYPE: &'static str = CONTENT_TYPE_FUNCTION_MODULE;

    fn collection_uri(config: &FunctionModuleConfig) -> String {
        format!("{}/fmodules", group_uri(config))
    }

    fn create_body(config: &FunctionModuleConfig) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<fmodule:abapFunctionModule xmlns:fmodule="http://www.sap.com/adt/functions/fmodules" xmlns:adtcore="http://www.sap.com/adt/core" {attributes}>
  <adtcore:containerRef adtcore:name="{group}" adtcore:type="{group_type}" adtcore:uri="{group_uri}"/>
  {package}
</fmodule:abapFunctionModule>"#,
            attributes = core_attributes(
                config,
                Self::KIND,
                &config.master_language,
                config.responsible.as_deref()
            ),
            group = escape(&config.function_group),
            group_type = ObjectKind::FunctionGroup.adt_type(),
            group_uri = escape(&group_uri(config)),
            package = package_ref(config),
        )
    }

    fn validation_request(config: &FunctionModuleConfig) -> AdtRequest {
        AdtRequest::post(FUNCTION_VALIDATION_PATH)
            .query("objtype", Self::KIND.adt_type())
            .query("objname", config.name.as_str())
            .query("fugrname", config.function_group.as_str())
            .query("description", config.description.as_str())
    }
}

object_functions!(FunctionModules, FunctionModuleConfig {
    validate: validate_function_module_name,
    create: create_function_module,
    read: get_function_module_metadata,
    read_source: read_function_module_source,
    lock: lock_function_module,
    unlock: unlock_function_module,
    update: update_function_module_source,
    check: check_function_module,
    activate: activate_function_module,
    check_deletion: check_function_module_deletion,
    delete: delete_function_module,
});

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FunctionModuleConfig {
        FunctionModuleConfig::new("z_fm_demo", "zfg_demo", "zpkg", "Demo module")
    }

    #[test]
    fn lives_under_its_function_group() {
        assert_eq!(
            FunctionModules::object_uri(&config()),
            "/sap/bc/adt/functions/groups/zfg_demo/fmodules/z_fm_demo"
        );
        assert_eq!(
            FunctionModules::source_uri(&config()),
            "/sap/bc/adt/functions/groups/zfg_demo/fmodules/z_fm_demo/source/main"
        );
    }

    #[test]
    fn create_body_references_container() {
        let body = FunctionModules::create_body(&config());
        assert!(body.contains(
            r#"<adtcore:containerRef adtcore:name="ZFG_DEMO" adtcore:type="FUGR/F" adtcore:uri="/sap/bc/adt/functions/groups/zfg_demo"/>"#
        ));
    }

    #[test]
    fn validation_names_the_group() {
        let request = FunctionModules::validation_request(&config());
        assert_eq!(request.query_value("fugrname"), Some("ZFG_DEMO"));
        assert_eq!(request.query_value("objtype"), Some("FUGR/FF"));
    }
}
