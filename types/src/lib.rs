//! Shared configuration types for GHANTI
//!
//! This crate contains serializable settings shared between the announcer
//! core (ghanti-core) and the frontends that persist and edit them.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Overlap Policy
// ─────────────────────────────────────────────────────────────────────────────

/// What to do when a new announcement arrives while one is still playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverlapPolicy {
    /// Cancel the in-flight announcement and start the new one.
    #[default]
    AbortAndRestart,
    /// Keep the in-flight announcement and reject the new request.
    IgnoreWhileBusy,
}

// ─────────────────────────────────────────────────────────────────────────────
// Announcer Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Runtime-tunable announcement settings, persisted as part of the app config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncerSettings {
    /// Master enable for announcements
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Speech volume (0-100)
    #[serde(default = "default_volume")]
    pub volume: u8,

    /// Gap between spoken words, in milliseconds
    #[serde(default = "default_word_gap_ms")]
    pub word_gap_ms: u64,

    /// Play the bell tone before speaking
    #[serde(default = "default_true")]
    pub tone_enabled: bool,

    /// Settle delay between the bell finishing and the first word, in milliseconds
    #[serde(default = "default_tone_settle_ms")]
    pub tone_settle_ms: u64,

    /// Phrase spoken when a payment notification carries no readable amount
    #[serde(default = "default_fallback_phrase")]
    pub fallback_phrase: String,
}

fn default_true() -> bool {
    true
}

fn default_volume() -> u8 {
    100
}

fn default_word_gap_ms() -> u64 {
    300
}

fn default_tone_settle_ms() -> u64 {
    200
}

fn default_fallback_phrase() -> String {
    "Money received".to_string()
}

impl Default for AnnouncerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: default_volume(),
            word_gap_ms: default_word_gap_ms(),
            tone_enabled: true,
            tone_settle_ms: default_tone_settle_ms(),
            fallback_phrase: default_fallback_phrase(),
        }
    }
}

impl AnnouncerSettings {
    /// Volume as a fraction in `[0.0, 1.0]` for synthesis calls
    pub fn volume_fraction(&self) -> f32 {
        f32::from(self.volume.min(100)) / 100.0
    }
}
