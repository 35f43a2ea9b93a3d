//! Application state.

use std::sync::Arc;

use strata_store::ConfigStore;

use crate::settings::Settings;

/// State shared across all handlers: the store and the immutable settings,
/// both constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    store: Arc<ConfigStore>,
    settings: Arc<Settings>,
}

impl AppState {
    /// Creates a new AppState.
    pub fn new(store: Arc<ConfigStore>, settings: Arc<Settings>) -> Self {
        Self { store, settings }
    }

    /// Returns the config store.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Returns the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
