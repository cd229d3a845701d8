//! Announcer service - coordinates extraction, composition, and sequencing
//!
//! Architecture:
//! - `AnnouncerService`: background task owning the sequencer, the focus
//!   arbiter, and the audio backends; drains a single message channel
//! - `ServiceHandle`: clonable front for adapters and the UI layer
//! - `EventSender`: posts backend lifecycle events and timer firings back
//!   into the same channel, keeping all state mutation on one task

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use ghanti_types::{AnnouncerSettings, OverlapPolicy};

use crate::backend::{SpeechBackend, ToneBackend};
use crate::compose::{compose, AnnouncementRequest};
use crate::config::AppConfig;
use crate::extract::classify_and_extract;
use crate::focus::{FocusArbiter, FocusOutcome};
use crate::notification::{EventSourceControl, NotificationRecord};
use crate::sequencer::{Effect, RunOutcome, Sequencer, SequencerEvent};

#[cfg(test)]
mod service_tests;

// ─────────────────────────────────────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────────────────────────────────────

/// Everything that flows into the service task.
#[derive(Debug)]
pub enum ServiceMessage {
    Command(ServiceCommand),
    Event(SequencerEvent),
}

#[derive(Debug)]
pub enum ServiceCommand {
    /// Run a notification through classify -> extract -> compose -> announce
    Notify(NotificationRecord),
    /// Speak raw text directly, bypassing extraction
    Test {
        text: String,
        volume: f32,
        gap_ms: u64,
    },
    UpdateSettings(AnnouncerSettings),
    Shutdown,
}

/// Create the service channel. The receiver goes to [`AnnouncerService::new`];
/// clones of the sender drive backends, timers, and the [`ServiceHandle`].
pub fn announcer_channel() -> (EventSender, mpsc::UnboundedReceiver<ServiceMessage>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, rx)
}

/// Sender handle for backend callbacks and timers.
///
/// Sends never block, so backends may post from their own playback threads.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<ServiceMessage>,
}

impl EventSender {
    /// Post a lifecycle event. Events for a stopped service are dropped.
    pub fn post(&self, event: SequencerEvent) {
        let _ = self.tx.send(ServiceMessage::Event(event));
    }

    fn command(&self, command: ServiceCommand) -> Result<(), ServiceError> {
        self.tx
            .send(ServiceMessage::Command(command))
            .map_err(|_| ServiceError::Stopped)
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("announcer service is no longer running")]
    Stopped,
}

// ─────────────────────────────────────────────────────────────────────────────
// Service Handle
// ─────────────────────────────────────────────────────────────────────────────

/// Handle used by event-source adapters and the UI layer.
#[derive(Clone)]
pub struct ServiceHandle {
    events: EventSender,
    control: Arc<dyn EventSourceControl>,
}

impl ServiceHandle {
    pub fn new(events: EventSender, control: Arc<dyn EventSourceControl>) -> Self {
        Self { events, control }
    }

    /// Submit one observed notification. Fire-and-forget: classification
    /// misses and rejected announcements are logged inside the service.
    pub fn announce(&self, record: NotificationRecord) -> Result<(), ServiceError> {
        self.events.command(ServiceCommand::Notify(record))
    }

    /// Speak raw text with the bell, bypassing extraction.
    pub fn test_announcement(
        &self,
        text: impl Into<String>,
        volume: f32,
        gap_ms: u64,
    ) -> Result<(), ServiceError> {
        self.events.command(ServiceCommand::Test {
            text: text.into(),
            volume,
            gap_ms,
        })
    }

    pub fn update_settings(&self, settings: AnnouncerSettings) -> Result<(), ServiceError> {
        self.events.command(ServiceCommand::UpdateSettings(settings))
    }

    pub fn shutdown(&self) -> Result<(), ServiceError> {
        self.events.command(ServiceCommand::Shutdown)
    }

    /// Whether the platform notification listener is enabled for this app
    pub fn is_event_source_enabled(&self) -> bool {
        self.control.is_enabled()
    }

    /// Open the platform settings screen for the event source
    pub fn open_event_source_settings(&self) {
        self.control.open_settings();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Service
// ─────────────────────────────────────────────────────────────────────────────

/// Background task that owns all announcement state.
pub struct AnnouncerService {
    rx: mpsc::UnboundedReceiver<ServiceMessage>,
    events: EventSender,
    sequencer: Sequencer,
    focus: Box<dyn FocusArbiter>,
    speech: Box<dyn SpeechBackend>,
    tone: Box<dyn ToneBackend>,
    settings: AnnouncerSettings,
    source_package: String,
    overlap_policy: OverlapPolicy,
}

impl AnnouncerService {
    pub fn new(
        rx: mpsc::UnboundedReceiver<ServiceMessage>,
        events: EventSender,
        config: AppConfig,
        speech: Box<dyn SpeechBackend>,
        tone: Box<dyn ToneBackend>,
        focus: Box<dyn FocusArbiter>,
    ) -> Self {
        let settings = config.announcer;
        let sequencer = Sequencer::new(
            Duration::from_millis(settings.tone_settle_ms),
            settings.tone_enabled,
        );

        Self {
            rx,
            events,
            sequencer,
            focus,
            speech,
            tone,
            settings,
            source_package: config.source_package,
            overlap_policy: config.overlap_policy,
        }
    }

    /// Drain the message channel until shutdown or all senders drop.
    pub async fn run(mut self) {
        info!(source = %self.source_package, "announcer service started");

        while let Some(message) = self.rx.recv().await {
            match message {
                ServiceMessage::Command(command) => {
                    if self.handle_command(command) {
                        break;
                    }
                }
                ServiceMessage::Event(event) => {
                    let effects = self.sequencer.handle(event);
                    self.run_effects(effects);
                }
            }
        }

        info!("announcer service stopped");
    }

    /// Returns true on shutdown.
    fn handle_command(&mut self, command: ServiceCommand) -> bool {
        match command {
            ServiceCommand::Notify(record) => self.handle_notification(record),
            ServiceCommand::Test {
                text,
                volume,
                gap_ms,
            } => {
                let request =
                    AnnouncementRequest::from_text(&text, volume, Duration::from_millis(gap_ms));
                self.submit(request);
            }
            ServiceCommand::UpdateSettings(settings) => {
                self.sequencer
                    .set_settle(Duration::from_millis(settings.tone_settle_ms));
                self.sequencer.set_tone_enabled(settings.tone_enabled);
                self.settings = settings;
                debug!("announcer settings updated");
            }
            ServiceCommand::Shutdown => return true,
        }
        false
    }

    fn handle_notification(&mut self, record: NotificationRecord) {
        if record.source_id != self.source_package {
            debug!(source = %record.source_id, "ignoring notification from unrecognized source");
            return;
        }
        if !self.settings.enabled {
            debug!("announcements disabled; dropping notification");
            return;
        }

        let Some(parsed) = classify_and_extract(&record.text, &record.extra_lines) else {
            debug!(posted_at = %record.posted_at, "notification is not a received payment");
            return;
        };

        info!(amount = ?parsed.value, "announcing payment notification");
        let tokens = compose(&parsed, &self.settings.fallback_phrase);
        let request = AnnouncementRequest::new(
            tokens,
            self.settings.volume_fraction(),
            Duration::from_millis(self.settings.word_gap_ms),
        );
        self.submit(request);
    }

    fn submit(&mut self, request: AnnouncementRequest) {
        self.sequencer.set_speech_ready(self.speech.is_ready());
        match self.sequencer.accept(request, self.overlap_policy) {
            Ok(effects) => self.run_effects(effects),
            Err(err) => warn!(%err, "announcement rejected"),
        }
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::AcquireFocus => {
                    if self.focus.acquire() == FocusOutcome::Denied {
                        warn!("audio focus denied; announcing without ducking");
                    }
                }
                Effect::ReleaseFocus => self.focus.release(),
                Effect::FlushSpeech => self.speech.flush(),
                Effect::PlayTone { generation } => {
                    if let Err(err) = self.tone.play(generation) {
                        warn!(%err, "tone playback failed; continuing with speech");
                        let followup = self.sequencer.handle(SequencerEvent::ToneError { generation });
                        self.run_effects(followup);
                    }
                }
                Effect::Synthesize {
                    utterance,
                    text,
                    volume,
                } => {
                    debug!(%utterance, word = %text, "synthesizing");
                    if let Err(err) = self.speech.synthesize(&text, volume, utterance) {
                        warn!(%err, %utterance, "synthesis submission failed");
                        let followup = self
                            .sequencer
                            .handle(SequencerEvent::UtteranceError { utterance });
                        self.run_effects(followup);
                    }
                }
                Effect::ScheduleSettle { generation, after } => {
                    self.schedule(after, SequencerEvent::SettleElapsed { generation });
                }
                Effect::ScheduleGap {
                    generation,
                    cursor,
                    after,
                } => {
                    self.schedule(after, SequencerEvent::GapElapsed { generation, cursor });
                }
                Effect::RunEnded { generation, outcome } => match outcome {
                    RunOutcome::Completed => info!(generation, "announcement finished"),
                    RunOutcome::Aborted => info!(generation, "announcement aborted"),
                },
            }
        }
    }

    /// Delay timers post generation-tagged events back into the channel;
    /// stale firings are discarded by the sequencer.
    fn schedule(&self, after: Duration, event: SequencerEvent) {
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            events.post(event);
        });
    }
}
