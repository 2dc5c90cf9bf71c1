//! Per-kind object configurations
//!
//! Each config is plain data supplied by the caller and never mutated by an
//! operation (the builder's transport step is the one exception, and it
//! only fills in `transport_request`).

use serde::{Deserialize, Serialize};

use super::object::ObjectConfig;
use crate::constants::DEFAULT_LANGUAGE;
use crate::impl_wire_value_conversions;

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

macro_rules! impl_object_config {
    ($config:ident) => {
        impl ObjectConfig for $config {
            fn name(&self) -> &str {
                &self.name
            }

            fn package_name(&self) -> &str {
                &self.package_name
            }

            fn description(&self) -> &str {
                &self.description
            }

            fn transport_request(&self) -> Option<&str> {
                self.transport_request.as_deref()
            }

            fn set_transport_request(&mut self, transport_request: Option<String>) {
                self.transport_request = transport_request;
            }

            fn source_code(&self) -> Option<&str> {
                self.source_code.as_deref()
            }
        }

        impl $config {
            #[must_use]
            pub fn with_source(mut self, source: impl Into<String>) -> Self {
                self.source_code = Some(source.into());
                self
            }

            #[must_use]
            pub fn with_transport(mut self, transport_request: impl Into<String>) -> Self {
                self.transport_request = Some(transport_request.into());
                self
            }

            #[must_use]
            pub fn with_responsible(mut self, user: impl Into<String>) -> Self {
                self.responsible = Some(user.into());
                self
            }
        }
    };
}

// ============================================================================
// Programs
// ============================================================================

/// Program type attribute written on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramType {
    #[default]
    Executable,
    Include,
    ModulePool,
    SubroutinePool,
    InterfacePool,
    ClassPool,
}

impl_wire_value_conversions!(ProgramType {
    Executable => "executableProgram",
    Include => "includeProgram",
    ModulePool => "modulePool",
    SubroutinePool => "subroutinePool",
    InterfacePool => "interfacePool",
    ClassPool => "classPool",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramConfig {
    pub name: String,
    pub package_name: String,
    pub description: String,
    #[serde(default)]
    pub transport_request: Option<String>,
    #[serde(default)]
    pub program_type: ProgramType,
    #[serde(default)]
    pub source_code: Option<String>,
    #[serde(default = "default_language")]
    pub master_language: String,
    #[serde(default)]
    pub responsible: Option<String>,
}

impl ProgramConfig {
    pub fn new(
        name: impl Into<String>,
        package_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().to_uppercase(),
            package_name: package_name.into().to_uppercase(),
            description: description.into(),
            transport_request: None,
            program_type: ProgramType::default(),
            source_code: None,
            master_language: default_language(),
            responsible: None,
        }
    }

    #[must_use]
    pub fn with_program_type(mut self, program_type: ProgramType) -> Self {
        self.program_type = program_type;
        self
    }
}

impl_object_config!(ProgramConfig);

// ============================================================================
// Classes and interfaces
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassVisibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl_wire_value_conversions!(ClassVisibility {
    Public => "public",
    Protected => "protected",
    Private => "private",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassConfig {
    pub name: String,
    pub package_name: String,
    pub description: String,
    #[serde(default)]
    pub transport_request: Option<String>,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default = "default_final")]
    pub is_final: bool,
    #[serde(default)]
    pub visibility: ClassVisibility,
    #[serde(default)]
    pub source_code: Option<String>,
    #[serde(default = "default_language")]
    pub master_language: String,
    #[serde(default)]
    pub responsible: Option<String>,
}

fn default_final() -> bool {
    true
}

impl ClassConfig {
    pub fn new(
        name: impl Into<String>,
        package_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().to_uppercase(),
            package_name: package_name.into().to_uppercase(),
            description: description.into(),
            transport_request: None,
            superclass: None,
            is_final: true,
            visibility: ClassVisibility::default(),
            source_code: None,
            master_language: default_language(),
            responsible: None,
        }
    }

    #[must_use]
    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into().to_uppercase());
        self
    }
}

impl_object_config!(ClassConfig);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceConfig {
    pub name: String,
    pub package_name: String,
    pub description: String,
    #[serde(default)]
    pub transport_request: Option<String>,
    #[serde(default)]
    pub source_code: Option<String>,
    #[serde(default = "default_language")]
    pub master_language: String,
    #[serde(default)]
    pub responsible: Option<String>,
}

impl InterfaceConfig {
    pub fn new(
        name: impl Into<String>,
        package_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().to_uppercase(),
            package_name: package_name.into().to_uppercase(),
            description: description.into(),
            transport_request: None,
            source_code: None,
            master_language: default_language(),
            responsible: None,
        }
    }
}

impl_object_config!(InterfaceConfig);

// ============================================================================
// Function groups and modules
// ============================================================================

/// Function groups carry no main source of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionGroupConfig {
    pub name: String,
    pub package_name: String,
    pub description: String,
    #[serde(default)]
    pub transport_request: Option<String>,
    #[serde(default = "default_language")]
    pub master_language: String,
    #[serde(default)]
    pub responsible: Option<String>,
}

impl FunctionGroupConfig {
    pub fn new(
        name: impl Into<String>,
        package_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().to_uppercase(),
            package_name: package_name.into().to_uppercase(),
            description: description.into(),
            transport_request: None,
            master_language: default_language(),
            responsible: None,
        }
    }

    #[must_use]
    pub fn with_transport(mut self, transport_request: impl Into<String>) -> Self {
        self.transport_request = Some(transport_request.into());
        self
    }
}

impl ObjectConfig for FunctionGroupConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn package_name(&self) -> &str {
        &self.package_name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn transport_request(&self) -> Option<&str> {
        self.transport_request.as_deref()
    }

    fn set_transport_request(&mut self, transport_request: Option<String>) {
        self.transport_request = transport_request;
    }

    fn source_code(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionModuleConfig {
    pub name: String,
    pub function_group: String,
    pub package_name: String,
    pub description: String,
    #[serde(default)]
    pub transport_request: Option<String>,
    #[serde(default)]
    pub source_code: Option<String>,
    #[serde(default = "default_language")]
    pub master_language: String,
    #[serde(default)]
    pub responsible: Option<String>,
}

impl FunctionModuleConfig {
    pub fn new(
        name: impl Into<String>,
        function_group: impl Into<String>,
        package_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().to_uppercase(),
            function_group: function_group.into().to_uppercase(),
            package_name: package_name.into().to_uppercase(),
            description: description.into(),
            transport_request: None,
            source_code: None,
            master_language: default_language(),
            responsible: None,
        }
    }
}

impl_object_config!(FunctionModuleConfig);

// ============================================================================
// Dictionary objects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureConfig {
    pub name: String,
    pub package_name: String,
    pub description: String,
    #[serde(default)]
    pub transport_request: Option<String>,
    #[serde(default)]
    pub source_code: Option<String>,
    #[serde(default = "default_language")]
    pub master_language: String,
    #[serde(default)]
    pub responsible: Option<String>,
}

impl StructureConfig {
    pub fn new(
        name: impl Into<String>,
        package_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().to_uppercase(),
            package_name: package_name.into().to_uppercase(),
            description: description.into(),
            transport_request: None,
            source_code: None,
            master_language: default_language(),
            responsible: None,
        }
    }
}

impl_object_config!(StructureConfig);

/// Table delivery class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeliveryClass {
    #[default]
    A,
    C,
    L,
    G,
    E,
    S,
    W,
}

impl_wire_value_conversions!(DeliveryClass {
    A => "A",
    C => "C",
    L => "L",
    G => "G",
    E => "E",
    S => "S",
    W => "W",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: String,
    pub package_name: String,
    pub description: String,
    #[serde(default)]
    pub transport_request: Option<String>,
    #[serde(default)]
    pub delivery_class: DeliveryClass,
    #[serde(default)]
    pub source_code: Option<String>,
    #[serde(default = "default_language")]
    pub master_language: String,
    #[serde(default)]
    pub responsible: Option<String>,
}

impl TableConfig {
    pub fn new(
        name: impl Into<String>,
        package_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().to_uppercase(),
            package_name: package_name.into().to_uppercase(),
            description: description.into(),
            transport_request: None,
            delivery_class: DeliveryClass::default(),
            source_code: None,
            master_language: default_language(),
            responsible: None,
        }
    }
}

impl_object_config!(TableConfig);

// ============================================================================
// Behavior definitions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorImplementationType {
    #[default]
    Managed,
    Unmanaged,
    Abstract,
    Projection,
    Interface,
}

impl_wire_value_conversions!(BehaviorImplementationType {
    Managed => "managed",
    Unmanaged => "unmanaged",
    Abstract => "abstract",
    Projection => "projection",
    Interface => "interface",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorDefinitionConfig {
    /// Behavior definitions share the name of their root entity by convention
    pub name: String,
    pub package_name: String,
    pub description: String,
    pub root_entity: String,
    #[serde(default)]
    pub implementation_type: BehaviorImplementationType,
    #[serde(default)]
    pub transport_request: Option<String>,
    #[serde(default)]
    pub source_code: Option<String>,
    #[serde(default = "default_language")]
    pub master_language: String,
    #[serde(default)]
    pub responsible: Option<String>,
}

impl BehaviorDefinitionConfig {
    pub fn new(
        root_entity: impl Into<String>,
        package_name: impl Into<String>,
        description: impl Into<String>,
        implementation_type: BehaviorImplementationType,
    ) -> Self {
        let root_entity = root_entity.into().to_uppercase();
        let mut config = Self {
            name: root_entity.clone(),
            package_name: package_name.into().to_uppercase(),
            description: description.into(),
            root_entity,
            implementation_type,
            transport_request: None,
            source_code: None,
            master_language: default_language(),
            responsible: None,
        };
        config.source_code = Some(config.skeleton_source());
        config
    }

    /// Implementation class named after the root entity, e.g.
    /// `ZI_TRAVEL` -> `zbp_i_travel`.
    pub fn implementation_class(&self) -> String {
        let entity = self.root_entity.to_lowercase();
        match entity.chars().next() {
            Some(prefix @ ('z' | 'y')) => format!("{prefix}bp_{}", &entity[1..]),
            _ => format!("zbp_{entity}"),
        }
    }

    /// Minimal behavior source for the configured implementation type.
    pub fn skeleton_source(&self) -> String {
        let entity = &self.root_entity;
        let class = self.implementation_class();
        match self.implementation_type {
            BehaviorImplementationType::Managed | BehaviorImplementationType::Unmanaged => {
                format!(
                    "{kind} implementation in class {class} unique;\nstrict ( 2 );\n\n\
                     define behavior for {entity}\nlock master\nauthorization master ( instance )\n\
                     {{\n  create;\n  update;\n  delete;\n}}\n",
                    kind = self.implementation_type,
                )
            }
            BehaviorImplementationType::Projection | BehaviorImplementationType::Interface => {
                format!(
                    "{kind};\nstrict ( 2 );\n\ndefine behavior for {entity}\n\
                     {{\n  use create;\n  use update;\n  use delete;\n}}\n",
                    kind = self.implementation_type,
                )
            }
            BehaviorImplementationType::Abstract => {
                format!("abstract;\n\ndefine behavior for {entity}\n{{\n}}\n")
            }
        }
    }
}

impl_object_config!(BehaviorDefinitionConfig);
