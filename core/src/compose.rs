//! Announcement composition
//!
//! Turns a classified payment into the ordered word tokens the sequencer
//! speaks one at a time.

use std::time::Duration;

use crate::extract::ParsedAmount;
use crate::words::to_words;

/// Spoken when a classified payment carries no readable amount and no
/// fallback phrase is configured.
pub const DEFAULT_FALLBACK_PHRASE: &str = "Money received";

/// One announcement, owned by the sequencer for the duration of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnouncementRequest {
    /// Words to speak, in order
    pub tokens: Vec<String>,
    /// Synthesis volume in `[0.0, 1.0]`
    pub volume: f32,
    /// Gap between consecutive words
    pub word_gap: Duration,
}

impl AnnouncementRequest {
    pub fn new(tokens: Vec<String>, volume: f32, word_gap: Duration) -> Self {
        Self {
            tokens,
            volume: volume.clamp(0.0, 1.0),
            word_gap,
        }
    }

    /// Build a request straight from raw text, bypassing classification.
    /// Used by the test-announcement control surface.
    pub fn from_text(text: &str, volume: f32, word_gap: Duration) -> Self {
        Self::new(tokenize(text), volume, word_gap)
    }
}

/// Compose the spoken token sequence for a classified payment.
///
/// A classified event always yields at least one token: a blank fallback
/// phrase falls back to [`DEFAULT_FALLBACK_PHRASE`].
pub fn compose(parsed: &ParsedAmount, fallback_phrase: &str) -> Vec<String> {
    let tokens = match parsed.value {
        Some(value) => tokenize(&format!("{} rupees received", to_words(value))),
        None => tokenize(fallback_phrase),
    };

    if tokens.is_empty() {
        return tokenize(DEFAULT_FALLBACK_PHRASE);
    }
    tokens
}

/// Split text on whitespace, dropping empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}
