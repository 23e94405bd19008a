// Application state module
// Shared per-process state handed to every request handler

use std::sync::atomic::AtomicBool;

use super::types::Config;
use crate::storage::SaveStore;

/// Application state
///
/// The storage directory flows through here as explicit configuration,
/// never as a global constant, so tests can point a handler at an
/// isolated temporary location.
pub struct AppState {
    pub config: Config,
    pub store: SaveStore,

    // Cached config value for fast access without locks
    pub cached_access_log: AtomicBool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = SaveStore::new(&config.storage.dir, config.storage.durable);
        let cached_access_log = AtomicBool::new(config.logging.access_log);

        Self {
            config,
            store,
            cached_access_log,
        }
    }
}
