//! Inbound notification records and event-source control
//!
//! The OS notification listener itself lives outside this crate; adapters
//! hand finished [`NotificationRecord`]s to the announcer service and expose
//! their enable/settings surface through [`EventSourceControl`].

use chrono::NaiveDateTime;

/// One observed notification, consumed in a single pipeline pass.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    /// Identifier of the producing app (e.g. an Android package name)
    pub source_id: String,
    /// Primary notification text
    pub text: String,
    /// Auxiliary text lines (expanded/inbox style), in display order
    pub extra_lines: Vec<String>,
    /// When the notification was posted
    pub posted_at: NaiveDateTime,
}

impl NotificationRecord {
    pub fn new(source_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            text: text.into(),
            extra_lines: Vec::new(),
            posted_at: chrono::Local::now().naive_local(),
        }
    }

    pub fn with_extra_lines(mut self, extra_lines: Vec<String>) -> Self {
        self.extra_lines = extra_lines;
        self
    }
}

/// Enable/settings surface of the platform notification listener.
///
/// The actual listener registration and permission UI belong to the OS
/// layer; the core only queries and forwards.
pub trait EventSourceControl: Send + Sync {
    /// Whether the platform event source is currently enabled for this app
    fn is_enabled(&self) -> bool;

    /// Open the platform settings screen for the event source, if any
    fn open_settings(&self);
}
