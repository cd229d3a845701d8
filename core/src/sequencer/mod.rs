//! Announcement sequencer
//!
//! This module provides:
//! - **Events**: asynchronous happenings (tone/utterance lifecycle, timers)
//!   delivered to the state machine
//! - **Effects**: side effects a transition requests (focus, tone, synthesis,
//!   timer scheduling), executed by the announcer service
//! - **Machine**: the single-writer state machine that paces word-by-word
//!   speech with tone playback, settle delays, and inter-word gaps
//!
//! # Runs and generations
//!
//! Each accepted announcement is one *run*, tagged with a monotonically
//! increasing generation. Events carry the generation of the run that caused
//! them; events from a superseded run never mutate current state.

mod error;
mod event;
mod machine;


pub use error::AcceptError;
pub use event::{Effect, RunOutcome, SequencerEvent, UtteranceId};
pub use machine::{Phase, Sequencer};
