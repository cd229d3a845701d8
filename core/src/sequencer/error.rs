//! Error types for announcement acceptance

use thiserror::Error;

/// Reasons an announcement request is rejected at the boundary.
///
/// Rejection creates no partial run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AcceptError {
    #[error("speech backend is not ready")]
    SpeechNotReady,

    #[error("announcement has no speakable words")]
    EmptyRequest,

    #[error("an announcement is already in progress")]
    Busy,
}
