//! Programs (`PROG/P`)

use adtkit_core::{ObjectAdapter, ObjectBuilder};
use adtkit_domain::{AdtRequest, ObjectKind, ProgramConfig};

use super::spec::{AdtObject, ObjectSpec};
use super::{core_attributes, object_functions, package_ref, validation_request};

pub const PROGRAMS_PATH: &str = "/sap/bc/adt/programs/programs";
pub const PROGRAM_VALIDATION_PATH: &str = "/sap/bc/adt/programs/validation";
pub const CONTENT_TYPE_PROGRAM: &str = "application/vnd.sap.adt.programs.programs.v2+xml";

#[derive(Debug, Clone, Copy, Default)]
pub struct Programs;

pub type ProgramOperations = AdtObject<Programs>;
pub type AdtProgram = ObjectAdapter<ProgramOperations>;
pub type ProgramBuilder = ObjectBuilder<ProgramOperations>;

impl ObjectSpec for Programs {
    type Config = ProgramConfig;

    const KIND: ObjectKind = ObjectKind::Program;
    const CONTENT_TYPE: &'static str = CONTENT_TYPE_PROGRAM;

    fn collection_uri(_config: &ProgramConfig) -> String {
        PROGRAMS_PATH.to_string()
    }

    fn create_body(config: &ProgramConfig) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<program:abapProgram xmlns:program="http://www.sap.com/adt/programs/programs" xmlns:adtcore="http://www.sap.com/adt/core" {attributes} program:programType="{program_type}">
  {package}
</program:abapProgram>"#,
            attributes = core_attributes(
                config,
                Self::KIND,
                &config.master_language,
                config.responsible.as_deref()
            ),
            program_type = config.program_type,
            package = package_ref(config),
        )
    }

    fn validation_request(config: &ProgramConfig) -> AdtRequest {
        validation_request(PROGRAM_VALIDATION_PATH, config, Self::KIND)
    }
}

object_functions!(Programs, ProgramConfig {
    validate: validate_program_name,
    create: create_program,
    read: get_program_metadata,
    read_source: read_program_source,
    lock: lock_program,
    unlock: unlock_program,
    update: update_program_source,
    check: check_program,
    activate: activate_program,
    check_deletion: check_program_deletion,
    delete: delete_program,
});
