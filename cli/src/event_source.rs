//! Desktop stand-in for the platform notification listener.
//!
//! On Android the event source is the notification-listener service and its
//! permission screen; on desktop the REPL's `notify` command plays that
//! role, so the source is always "enabled" and there is nothing to open.

use tracing::info;

use ghanti_core::EventSourceControl;

#[derive(Debug, Default)]
pub struct DesktopEventSource;

impl DesktopEventSource {
    pub fn new() -> Self {
        Self
    }
}

impl EventSourceControl for DesktopEventSource {
    fn is_enabled(&self) -> bool {
        true
    }

    fn open_settings(&self) {
        info!("notification access is fed through the REPL on desktop; no settings screen");
    }
}
