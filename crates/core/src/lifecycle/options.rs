//! Options for the create and update chains

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use adtkit_domain::{LifecycleConfig, LockHandle};

/// Invoked with the handle right after a successful lock.
pub type LockCallback = Arc<dyn Fn(&LockHandle) + Send + Sync>;

/// Polling used to wait until a freshly created object is readable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingOptions {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for PollingOptions {
    fn default() -> Self {
        Self::from(&LifecycleConfig::default())
    }
}

impl From<&LifecycleConfig> for PollingOptions {
    fn from(config: &LifecycleConfig) -> Self {
        Self {
            attempts: config.poll_attempts.max(1),
            interval: Duration::from_millis(config.poll_interval_ms),
        }
    }
}

#[derive(Clone, Default)]
pub struct CreateOptions {
    /// Activate after the final check
    pub activate: bool,
    /// Delete the object again if a later step fails
    pub delete_on_failure: bool,
    /// Wait for the object to become readable after creation
    pub poll: Option<PollingOptions>,
    pub on_lock: Option<LockCallback>,
}

impl CreateOptions {
    #[must_use]
    pub fn activate(mut self, activate: bool) -> Self {
        self.activate = activate;
        self
    }

    #[must_use]
    pub fn delete_on_failure(mut self, delete: bool) -> Self {
        self.delete_on_failure = delete;
        self
    }

    #[must_use]
    pub fn poll(mut self, polling: PollingOptions) -> Self {
        self.poll = Some(polling);
        self
    }

    #[must_use]
    pub fn on_lock(mut self, callback: impl Fn(&LockHandle) + Send + Sync + 'static) -> Self {
        self.on_lock = Some(Arc::new(callback));
        self
    }
}

impl From<&LifecycleConfig> for CreateOptions {
    fn from(config: &LifecycleConfig) -> Self {
        Self {
            activate: config.activate,
            delete_on_failure: config.delete_on_failure,
            poll: Some(PollingOptions::from(config)),
            on_lock: None,
        }
    }
}

impl fmt::Debug for CreateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateOptions")
            .field("activate", &self.activate)
            .field("delete_on_failure", &self.delete_on_failure)
            .field("poll", &self.poll)
            .field("on_lock", &self.on_lock.is_some())
            .finish()
    }
}

#[derive(Clone, Default)]
pub struct UpdateOptions {
    pub activate: bool,
    pub on_lock: Option<LockCallback>,
}

impl UpdateOptions {
    #[must_use]
    pub fn activate(mut self, activate: bool) -> Self {
        self.activate = activate;
        self
    }

    #[must_use]
    pub fn on_lock(mut self, callback: impl Fn(&LockHandle) + Send + Sync + 'static) -> Self {
        self.on_lock = Some(Arc::new(callback));
        self
    }
}

impl From<&LifecycleConfig> for UpdateOptions {
    fn from(config: &LifecycleConfig) -> Self {
        Self { activate: config.activate, on_lock: None }
    }
}

impl fmt::Debug for UpdateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateOptions")
            .field("activate", &self.activate)
            .field("on_lock", &self.on_lock.is_some())
            .finish()
    }
}
