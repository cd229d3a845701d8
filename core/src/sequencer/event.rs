//! Sequencer events and effects

use std::fmt;
use std::time::Duration;

/// Identifies one synthesis call within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtteranceId {
    pub generation: u64,
    pub index: usize,
}

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "word-{}-{}", self.generation, self.index)
    }
}

/// Asynchronous happenings delivered to the sequencer.
///
/// Every event carries the generation of the run it belongs to; the machine
/// discards events whose generation does not match the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    /// Alert tone finished playing
    ToneComplete { generation: u64 },
    /// Alert tone failed; speech proceeds regardless
    ToneError { generation: u64 },
    /// Tone-to-speech settle delay elapsed
    SettleElapsed { generation: u64 },
    /// Synthesis of one word completed
    UtteranceDone { utterance: UtteranceId },
    /// Synthesis of one word failed; fatal to the run
    UtteranceError { utterance: UtteranceId },
    /// Inter-word gap elapsed after the word at `cursor`
    GapElapsed { generation: u64, cursor: usize },
}

impl SequencerEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::ToneComplete { generation }
            | Self::ToneError { generation }
            | Self::SettleElapsed { generation }
            | Self::GapElapsed { generation, .. } => *generation,
            Self::UtteranceDone { utterance } | Self::UtteranceError { utterance } => {
                utterance.generation
            }
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every word was spoken
    Completed,
    /// Preempted or killed by a synthesis failure
    Aborted,
}

/// Side effects requested by a transition, executed by the service in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Request the transient audio-focus grant
    AcquireFocus,
    /// Give the audio-focus grant back
    ReleaseFocus,
    /// Start alert-tone playback
    PlayTone { generation: u64 },
    /// Cancel the in-flight utterance of a preempted run
    FlushSpeech,
    /// Submit one word to the speech backend
    Synthesize {
        utterance: UtteranceId,
        text: String,
        volume: f32,
    },
    /// Schedule the tone-to-speech settle delay
    ScheduleSettle { generation: u64, after: Duration },
    /// Schedule the inter-word gap after the word at `cursor`
    ScheduleGap {
        generation: u64,
        cursor: usize,
        after: Duration,
    },
    /// A run reached a terminal phase
    RunEnded {
        generation: u64,
        outcome: RunOutcome,
    },
}
