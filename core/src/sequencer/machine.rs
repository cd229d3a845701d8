//! The announcement state machine
//!
//! Single-writer: only [`Sequencer::accept`] and [`Sequencer::handle`]
//! mutate phase and cursor. Transitions never block; they return the side
//! effects the service must execute.

use std::time::Duration;

use tracing::{debug, trace};

use ghanti_types::OverlapPolicy;

use super::error::AcceptError;
use super::event::{Effect, RunOutcome, SequencerEvent, UtteranceId};
use crate::compose::AnnouncementRequest;

/// Where the current run is in its lifecycle.
///
/// The cursor in `Speaking`/`Cooling` always indexes a real token. `Done`
/// and `Aborted` are terminal: the machine accepts the next request from
/// either exactly as it would from `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Tone requested; waiting for it to finish and the settle delay to pass
    AwaitingTone,
    /// Word at the index has been submitted for synthesis
    Speaking(usize),
    /// Word at the index finished; waiting out the inter-word gap
    Cooling(usize),
    Done,
    Aborted,
}

/// Timer-driven state machine pacing one announcement at a time.
#[derive(Debug)]
pub struct Sequencer {
    phase: Phase,
    tokens: Vec<String>,
    volume: f32,
    word_gap: Duration,
    generation: u64,

    /// Delay between tone completion and the first word
    settle: Duration,
    /// Whether runs start with the alert tone at all
    tone_enabled: bool,
    /// Mirrors the speech backend's readiness; gated at accept time
    speech_ready: bool,
    /// Whether the current run still holds the focus grant
    focus_held: bool,
}

impl Sequencer {
    pub fn new(settle: Duration, tone_enabled: bool) -> Self {
        Self {
            phase: Phase::Idle,
            tokens: Vec::new(),
            volume: 1.0,
            word_gap: Duration::ZERO,
            generation: 0,
            settle,
            tone_enabled,
            speech_ready: false,
            focus_held: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a run is in a non-terminal phase
    pub fn is_active(&self) -> bool {
        matches!(
            self.phase,
            Phase::AwaitingTone | Phase::Speaking(_) | Phase::Cooling(_)
        )
    }

    pub fn set_speech_ready(&mut self, ready: bool) {
        self.speech_ready = ready;
    }

    pub fn set_settle(&mut self, settle: Duration) {
        self.settle = settle;
    }

    pub fn set_tone_enabled(&mut self, tone_enabled: bool) {
        self.tone_enabled = tone_enabled;
    }

    /// Accept a new announcement, preempting any active run.
    ///
    /// Rejection leaves existing state untouched; in particular a rejected
    /// request never cancels the run already playing.
    pub fn accept(
        &mut self,
        request: AnnouncementRequest,
        policy: OverlapPolicy,
    ) -> Result<Vec<Effect>, AcceptError> {
        if !self.speech_ready {
            return Err(AcceptError::SpeechNotReady);
        }
        if request.tokens.is_empty() {
            return Err(AcceptError::EmptyRequest);
        }

        let mut effects = Vec::new();
        if self.is_active() {
            match policy {
                OverlapPolicy::IgnoreWhileBusy => return Err(AcceptError::Busy),
                OverlapPolicy::AbortAndRestart => {
                    debug!(
                        generation = self.generation,
                        "preempting active announcement"
                    );
                    effects.push(Effect::FlushSpeech);
                    self.end_run(RunOutcome::Aborted, &mut effects);
                }
            }
        }

        self.generation += 1;
        self.tokens = request.tokens;
        self.volume = request.volume;
        self.word_gap = request.word_gap;
        self.focus_held = true;
        effects.push(Effect::AcquireFocus);

        if self.tone_enabled {
            self.phase = Phase::AwaitingTone;
            effects.push(Effect::PlayTone {
                generation: self.generation,
            });
        } else {
            self.start_word(0, &mut effects);
        }

        Ok(effects)
    }

    /// Feed one asynchronous event into the machine.
    ///
    /// Stale events (generation mismatch, or a phase that is not expecting
    /// them) are discarded without touching state.
    pub fn handle(&mut self, event: SequencerEvent) -> Vec<Effect> {
        if event.generation() != self.generation {
            trace!(
                current = self.generation,
                stale = event.generation(),
                "discarding event from superseded run"
            );
            return Vec::new();
        }

        let mut effects = Vec::new();
        match (self.phase, event) {
            (Phase::AwaitingTone, SequencerEvent::ToneComplete { generation }) => {
                effects.push(Effect::ScheduleSettle {
                    generation,
                    after: self.settle,
                });
            }
            (Phase::AwaitingTone, SequencerEvent::ToneError { .. }) => {
                // Tone is best-effort; go straight to the first word.
                self.start_word(0, &mut effects);
            }
            (Phase::AwaitingTone, SequencerEvent::SettleElapsed { .. }) => {
                self.start_word(0, &mut effects);
            }
            (Phase::Speaking(cursor), SequencerEvent::UtteranceDone { utterance })
                if utterance.index == cursor =>
            {
                self.phase = Phase::Cooling(cursor);
                effects.push(Effect::ScheduleGap {
                    generation: self.generation,
                    cursor,
                    after: self.word_gap,
                });
            }
            (Phase::Speaking(_), SequencerEvent::UtteranceError { utterance }) => {
                debug!(%utterance, "synthesis failed; aborting run");
                self.end_run(RunOutcome::Aborted, &mut effects);
            }
            (Phase::Cooling(cursor), SequencerEvent::GapElapsed { cursor: fired, .. })
                if fired == cursor =>
            {
                let next = cursor + 1;
                if next < self.tokens.len() {
                    self.start_word(next, &mut effects);
                } else {
                    self.end_run(RunOutcome::Completed, &mut effects);
                }
            }
            (phase, event) => {
                trace!(?phase, ?event, "event does not apply to current phase");
            }
        }
        effects
    }

    fn start_word(&mut self, index: usize, effects: &mut Vec<Effect>) {
        self.phase = Phase::Speaking(index);
        effects.push(Effect::Synthesize {
            utterance: UtteranceId {
                generation: self.generation,
                index,
            },
            text: self.tokens[index].clone(),
            volume: self.volume,
        });
    }

    /// Move to a terminal phase, releasing focus exactly once.
    fn end_run(&mut self, outcome: RunOutcome, effects: &mut Vec<Effect>) {
        if self.focus_held {
            self.focus_held = false;
            effects.push(Effect::ReleaseFocus);
        }
        self.phase = match outcome {
            RunOutcome::Completed => Phase::Done,
            RunOutcome::Aborted => Phase::Aborted,
        };
        effects.push(Effect::RunEnded {
            generation: self.generation,
            outcome,
        });
    }
}
