//! Application state for the rate card preview service.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the loaded contract catalogue. The engine itself keeps no state, so
/// this is the only thing handlers share.
#[derive(Clone)]
pub struct AppState {
    catalogue: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state around a loaded catalogue.
    pub fn new(catalogue: ConfigLoader) -> Self {
        Self {
            catalogue: Arc::new(catalogue),
        }
    }

    /// Returns the contract catalogue.
    pub fn catalogue(&self) -> &ConfigLoader {
        &self.catalogue
    }
}
