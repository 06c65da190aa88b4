// Application state module
// Shared per-process state handed to every connection

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::types::Config;
use crate::store::SharedItemStore;

/// Application state
pub struct AppState {
    pub config: Config,

    // Cached config values for fast access without locks
    pub cached_access_log: Arc<AtomicBool>,

    // Item persistence, injected so handlers never touch the filesystem directly
    pub store: SharedItemStore,
}

impl AppState {
    pub fn new(config: &Config, store: SharedItemStore) -> Self {
        Self {
            config: config.clone(),
            cached_access_log: Arc::new(AtomicBool::new(config.logging.access_log)),
            store,
        }
    }
}
