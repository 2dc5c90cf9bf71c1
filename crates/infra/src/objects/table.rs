//! Transparent tables (`TABL/DT`)

use std::borrow::Cow;

use adtkit_core::{ObjectAdapter, ObjectBuilder};
use adtkit_domain::{AdtRequest, ObjectKind, Result, TableConfig};

use super::spec::{AdtObject, ObjectSpec, UpdatePayload};
use super::structure::blue_source;
use super::{core_attributes, object_functions, package_ref, validation_request};

pub const TABLES_PATH: &str = "/sap/bc/adt/ddic/tables";
pub const TABLE_VALIDATION_PATH: &str = "/sap/bc/adt/ddic/tables/validation";
pub const CONTENT_TYPE_TABLE: &str = "application/vnd.sap.adt.tables.v2+xml";

#[derive(Debug, Clone, Copy, Default)]
pub struct Tables;

pub type TableOperations = AdtObject<Tables>;
pub type AdtTable = ObjectAdapter<TableOperations>;
pub type TableBuilder = ObjectBuilder<TableOperations>;

impl ObjectSpec for Tables {
    type Config = TableConfig;

    const KIND: ObjectKind = ObjectKind::Table;
    const CONTENT_TYPE: &'static str = CONTENT_TYPE_TABLE;

    fn collection_uri(_config: &TableConfig) -> String {
        TABLES_PATH.to_string()
    }

    fn create_body(config: &TableConfig) -> String {
        blue_source(
            &core_attributes(config, Self::KIND, &config.master_language, config.responsible.as_deref()),
            &package_ref(config),
        )
    }

    fn validation_request(config: &TableConfig) -> AdtRequest {
        validation_request(TABLE_VALIDATION_PATH, config, Self::KIND)
    }

    fn writes_after_create(_config: &TableConfig) -> bool {
        true
    }

    /// The delivery class travels as a source annotation. Without a source
    /// a client-only table definition is written.
    fn update_payload(config: &TableConfig) -> Result<UpdatePayload<'_>> {
        let source = match config.source_code.as_deref() {
            Some(source) => with_delivery_class(config, source),
            None => Cow::Owned(table_source(config)),
        };
        Ok(UpdatePayload::Source(source))
    }
}

object_functions!(Tables, TableConfig {
    validate: validate_table_name,
    create: create_table,
    read: get_table_metadata,
    read_source: read_table_source,
    lock: lock_table,
    unlock: unlock_table,
    update: update_table_source,
    check: check_table,
    activate: activate_table,
    check_deletion: check_table_deletion,
    delete: delete_table,
});

/// Header annotations for a new table source, delivery class included.
pub fn table_source_header(config: &TableConfig) -> String {
    format!(
        "@EndUserText.label : '{}'\n@AbapCatalog.enhancement.category : #NOT_EXTENSIBLE\n\
         @AbapCatalog.tableCategory : #TRANSPARENT\n@AbapCatalog.deliveryClass : #{}\n\
         @AbapCatalog.dataMaintenance : #RESTRICTED\n",
        config.description.replace('\'', "''"),
        config.delivery_class,
    )
}

/// Minimal table source: the header and a client key field.
pub fn table_source(config: &TableConfig) -> String {
    format!(
        "{}define table {} {{\n  key client : abap.clnt not null;\n}}\n",
        table_source_header(config),
        config.name.to_lowercase(),
    )
}

/// Add the configured delivery class to a source that does not set one.
fn with_delivery_class<'a>(config: &TableConfig, source: &'a str) -> Cow<'a, str> {
    if source.contains("@AbapCatalog.deliveryClass") {
        return Cow::Borrowed(source);
    }
    let Some(start) = source.to_ascii_lowercase().find("define table") else {
        return Cow::Borrowed(source);
    };
    let mut patched = String::with_capacity(source.len() + 40);
    patched.push_str(&source[..start]);
    patched.push_str(&format!("@AbapCatalog.deliveryClass : #{}\n", config.delivery_class));
    patched.push_str(&source[start..]);
    Cow::Owned(patched)
}
