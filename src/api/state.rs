//! Application state for the salary apportionment API.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Handlers only read the payroll configuration, so it is shared behind an
/// `Arc` without locking.
#[derive(Clone, Default)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }
}
