//! GHANTI core - payment-notification voice announcement pipeline
//!
//! Data flow: an event-source adapter hands [`NotificationRecord`]s to the
//! [`AnnouncerService`], which classifies the text ([`extract`]), converts
//! the amount to Indian-scale words ([`words`]), composes the spoken tokens
//! ([`compose`]), and paces tone + word-by-word synthesis through the
//! [`Sequencer`] with audio-focus arbitration ([`focus`]).

pub mod backend;
pub mod compose;
pub mod config;
pub mod extract;
pub mod focus;
pub mod notification;
pub mod sequencer;
pub mod service;
pub mod words;

pub use backend::{SpeechBackend, SpeechError, ToneBackend, ToneError};
pub use compose::{compose, tokenize, AnnouncementRequest, DEFAULT_FALLBACK_PHRASE};
pub use config::{AppConfig, ConfigError, DEFAULT_SOURCE_PACKAGE};
pub use extract::{classify_and_extract, ParsedAmount};
pub use focus::{FocusArbiter, FocusOutcome, TransientFocus};
pub use notification::{EventSourceControl, NotificationRecord};
pub use sequencer::{
    AcceptError, Effect, Phase, RunOutcome, Sequencer, SequencerEvent, UtteranceId,
};
pub use service::{
    announcer_channel, AnnouncerService, EventSender, ServiceCommand, ServiceError, ServiceHandle,
    ServiceMessage,
};
pub use words::to_words;
