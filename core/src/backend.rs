//! Audio and speech backend contracts
//!
//! Backends execute synthesis and tone playback out of band and report
//! lifecycle through the service event channel; the calls here only submit.

use std::path::PathBuf;

use thiserror::Error;

use crate::sequencer::UtteranceId;

/// Speech-synthesis engine boundary.
///
/// `synthesize` submits one word and returns immediately; completion or
/// failure arrives later as a [`crate::sequencer::SequencerEvent`] tagged
/// with the utterance id.
pub trait SpeechBackend: Send {
    /// Whether the engine is initialized and can take utterances
    fn is_ready(&self) -> bool;

    /// Submit one utterance at the given volume in `[0.0, 1.0]`
    fn synthesize(
        &mut self,
        text: &str,
        volume: f32,
        utterance: UtteranceId,
    ) -> Result<(), SpeechError>;

    /// Cancel any in-flight utterance. Its completion event may still arrive
    /// and is discarded by generation tagging.
    fn flush(&mut self);
}

/// Alert-tone playback boundary. Completion/failure arrives as a
/// generation-tagged event.
pub trait ToneBackend: Send {
    fn play(&mut self, generation: u64) -> Result<(), ToneError>;
}

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech engine is not initialized")]
    NotReady,

    #[error("speech engine rejected the utterance: {reason}")]
    Rejected { reason: String },
}

#[derive(Debug, Error)]
pub enum ToneError {
    #[error("no tone clip found at {path}")]
    MissingClip { path: PathBuf },

    #[error("audio output unavailable")]
    NoOutput,
}
