//! Lock handles issued by SAP

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque token identifying an exclusive edit lock.
///
/// Valid until unlocked or until the stateful session ends. The same handle
/// must be passed unchanged to the matching update and unlock calls.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockHandle(String);

impl LockHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Handles are credentials for the lock; keep them out of debug logs.
impl fmt::Debug for LockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.0.chars().take(4).collect();
        write!(f, "LockHandle({visible}…)")
    }
}

/// Parsed `com.sap.adt.lock.result` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockResult {
    pub handle: LockHandle,
    /// Transport request the object is recorded on (`CORRNR`)
    pub correction_number: Option<String>,
    /// Owner of that transport request (`CORRUSER`)
    pub correction_user: Option<String>,
    /// Transport request text (`CORRTEXT`)
    pub correction_text: Option<String>,
    /// `IS_LOCAL` flag: object lives in a local package
    pub is_local: bool,
}
