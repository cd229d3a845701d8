use std::sync::Arc;

use tokio::sync::RwLock;

use ghanti_core::{AppConfig, ServiceHandle};

/// Shared state for REPL commands.
pub struct CliContext {
    /// Front to the running announcer service
    pub handle: ServiceHandle,
    /// Persisted configuration, kept in sync with the service
    pub config: Arc<RwLock<AppConfig>>,
}

impl CliContext {
    pub fn new(handle: ServiceHandle, config: AppConfig) -> Self {
        Self {
            handle,
            config: Arc::new(RwLock::new(config)),
        }
    }
}
