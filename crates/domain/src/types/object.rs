//! Repository object identity shared by every object kind.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::impl_wire_value_conversions;

/// ABAP repository object kinds handled by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Program,
    Class,
    Interface,
    FunctionGroup,
    FunctionModule,
    Structure,
    Table,
    BehaviorDefinition,
}

impl ObjectKind {
    /// ADT object type, e.g. `PROG/P`
    pub fn adt_type(&self) -> &'static str {
        match self {
            Self::Program => "PROG/P",
            Self::Class => "CLAS/OC",
            Self::Interface => "INTF/OI",
            Self::FunctionGroup => "FUGR/F",
            Self::FunctionModule => "FUGR/FF",
            Self::Structure => "TABL/DS",
            Self::Table => "TABL/DT",
            Self::BehaviorDefinition => "BDEF/BDO",
        }
    }

    /// Human readable label used in log lines and error messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Program => "program",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::FunctionGroup => "function group",
            Self::FunctionModule => "function module",
            Self::Structure => "structure",
            Self::Table => "table",
            Self::BehaviorDefinition => "behavior definition",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which version of an object a check run looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckVersion {
    Active,
    #[default]
    Inactive,
}

impl_wire_value_conversions!(CheckVersion {
    Active => "active",
    Inactive => "inactive",
});

/// Reference to a repository object as ADT addresses it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectReference {
    pub uri: String,
    pub name: String,
    pub adt_type: String,
}

impl ObjectReference {
    pub fn new(uri: impl Into<String>, name: impl Into<String>, kind: ObjectKind) -> Self {
        Self { uri: uri.into(), name: name.into(), adt_type: kind.adt_type().to_string() }
    }
}

/// Common view over every per-kind configuration.
///
/// The lifecycle driver only needs these accessors; type-specific fields
/// stay on the concrete config structs.
pub trait ObjectConfig: Clone + fmt::Debug + Send + Sync + 'static {
    fn name(&self) -> &str;
    fn package_name(&self) -> &str;
    fn description(&self) -> &str;
    fn transport_request(&self) -> Option<&str>;
    fn set_transport_request(&mut self, transport_request: Option<String>);
    /// Source to write after creation or on update, if any.
    fn source_code(&self) -> Option<&str>;
}
