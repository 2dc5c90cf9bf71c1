//! Domain types and models

pub mod activation;
pub mod check;
pub mod configs;
pub mod lock;
pub mod object;
pub mod request;
pub mod state;
pub mod transport;
pub mod validation;

pub use activation::{ActivationMessage, ActivationResult};
pub use check::{CheckMessage, CheckReport, CheckSeverity};
pub use configs::{
    BehaviorDefinitionConfig, BehaviorImplementationType, ClassConfig, ClassVisibility,
    DeliveryClass, FunctionGroupConfig, FunctionModuleConfig, InterfaceConfig, ProgramConfig,
    ProgramType, StructureConfig, TableConfig,
};
pub use lock::{LockHandle, LockResult};
pub use object::{CheckVersion, ObjectConfig, ObjectKind, ObjectReference};
pub use request::{AdtRequest, AdtResponse, HttpMethod, SessionType};
pub use state::{CompletedStep, OperationErrorEntry, OperationMethod, OperationState};
pub use transport::{TransportConfig, TransportRequest, TransportRequestType};
pub use validation::ValidationOutcome;
