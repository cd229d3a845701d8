//! End-to-end tests for the announcer service
//!
//! Runs the real service task against scripted backends on a paused tokio
//! clock, asserting on the ordered log of focus, tone, and synthesis calls.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use ghanti_types::OverlapPolicy;

use super::{announcer_channel, AnnouncerService, EventSender, ServiceHandle};
use crate::backend::{SpeechBackend, SpeechError, ToneBackend, ToneError};
use crate::config::{AppConfig, DEFAULT_SOURCE_PACKAGE};
use crate::focus::{FocusArbiter, FocusOutcome};
use crate::notification::{EventSourceControl, NotificationRecord};
use crate::sequencer::{SequencerEvent, UtteranceId};

// ─────────────────────────────────────────────────────────────────────────────
// Scripted backends
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered record of every externally visible call the service makes.
#[derive(Clone, Default)]
struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    fn count(&self, entry: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|e| *e == entry).count()
    }
}

struct ScriptedSpeech {
    events: EventSender,
    log: CallLog,
    /// (word, virtual submit time) per synthesis call
    times: Arc<Mutex<Vec<(String, Instant)>>>,
    ready: bool,
    /// Post UtteranceDone immediately after each submit
    auto_complete: bool,
    /// Post UtteranceError instead of Done for this word index
    fail_index: Option<usize>,
}

impl SpeechBackend for ScriptedSpeech {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn synthesize(
        &mut self,
        text: &str,
        _volume: f32,
        utterance: UtteranceId,
    ) -> Result<(), SpeechError> {
        self.log.push(format!("speak {text}"));
        self.times
            .lock()
            .unwrap()
            .push((text.to_string(), Instant::now()));

        if self.fail_index == Some(utterance.index) {
            self.events.post(SequencerEvent::UtteranceError { utterance });
        } else if self.auto_complete {
            self.events.post(SequencerEvent::UtteranceDone { utterance });
        }
        Ok(())
    }

    fn flush(&mut self) {
        self.log.push("flush");
    }
}

struct InstantTone {
    events: EventSender,
    log: CallLog,
    fail: bool,
}

impl ToneBackend for InstantTone {
    fn play(&mut self, generation: u64) -> Result<(), ToneError> {
        self.log.push("tone");
        if self.fail {
            return Err(ToneError::NoOutput);
        }
        self.events.post(SequencerEvent::ToneComplete { generation });
        Ok(())
    }
}

struct LoggingFocus {
    log: CallLog,
}

impl FocusArbiter for LoggingFocus {
    fn acquire(&mut self) -> FocusOutcome {
        self.log.push("focus acquired");
        FocusOutcome::Granted
    }

    fn release(&mut self) {
        self.log.push("focus released");
    }
}

struct StubControl;

impl EventSourceControl for StubControl {
    fn is_enabled(&self) -> bool {
        true
    }

    fn open_settings(&self) {}
}

// ─────────────────────────────────────────────────────────────────────────────
// Harness
// ─────────────────────────────────────────────────────────────────────────────

struct Harness {
    handle: ServiceHandle,
    events: EventSender,
    log: CallLog,
    times: Arc<Mutex<Vec<(String, Instant)>>>,
}

#[derive(Default)]
struct Script {
    speech_ready: Option<bool>,
    auto_complete: Option<bool>,
    fail_index: Option<usize>,
    tone_fails: bool,
    config: Option<AppConfig>,
}

fn spawn_service(script: Script) -> Harness {
    let (events, rx) = announcer_channel();
    let log = CallLog::default();
    let times = Arc::new(Mutex::new(Vec::new()));

    let speech = ScriptedSpeech {
        events: events.clone(),
        log: log.clone(),
        times: Arc::clone(&times),
        ready: script.speech_ready.unwrap_or(true),
        auto_complete: script.auto_complete.unwrap_or(true),
        fail_index: script.fail_index,
    };
    let tone = InstantTone {
        events: events.clone(),
        log: log.clone(),
        fail: script.tone_fails,
    };
    let focus = LoggingFocus { log: log.clone() };

    let service = AnnouncerService::new(
        rx,
        events.clone(),
        script.config.unwrap_or_default(),
        Box::new(speech),
        Box::new(tone),
        Box::new(focus),
    );
    tokio::spawn(service.run());

    let handle = ServiceHandle::new(events.clone(), Arc::new(StubControl));
    Harness {
        handle,
        events,
        log,
        times,
    }
}

/// Let the paused clock run every pending timer out.
async fn settle() {
    tokio::time::sleep(Duration::from_secs(30)).await;
}

fn record(text: &str) -> NotificationRecord {
    NotificationRecord::new(DEFAULT_SOURCE_PACKAGE, text)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_announcement_sequences_tone_words_and_focus() {
    let harness = spawn_service(Script::default());

    harness
        .handle
        .test_announcement("twenty rupees received", 1.0, 300)
        .unwrap();
    settle().await;

    assert_eq!(
        harness.log.entries(),
        vec![
            "focus acquired",
            "tone",
            "speak twenty",
            "speak rupees",
            "speak received",
            "focus released",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn words_are_spaced_by_at_least_the_gap() {
    let harness = spawn_service(Script::default());

    harness
        .handle
        .test_announcement("twenty rupees received", 1.0, 300)
        .unwrap();
    settle().await;

    let times = harness.times.lock().unwrap();
    assert_eq!(times.len(), 3, "expected exactly 3 synthesis calls");
    for pair in times.windows(2) {
        let gap = pair[1].1.duration_since(pair[0].1);
        assert!(
            gap >= Duration::from_millis(300),
            "gap between {:?} and {:?} was {gap:?}",
            pair[0].0,
            pair[1].0
        );
    }
}

#[tokio::test(start_paused = true)]
async fn notification_is_classified_extracted_and_spoken() {
    let harness = spawn_service(Script::default());

    harness
        .handle
        .announce(record("You received Rs. 1,500 in your account"))
        .unwrap();
    settle().await;

    let spoken: Vec<String> = harness
        .times
        .lock()
        .unwrap()
        .iter()
        .map(|(word, _)| word.clone())
        .collect();
    assert_eq!(
        spoken,
        vec!["one", "thousand", "five", "hundred", "rupees", "received"]
    );
}

#[tokio::test(start_paused = true)]
async fn unrecognized_source_and_non_payment_text_stay_silent() {
    let harness = spawn_service(Script::default());

    harness
        .handle
        .announce(NotificationRecord::new("com.other.app", "You received Rs. 500"))
        .unwrap();
    harness
        .handle
        .announce(record("Balance check requested"))
        .unwrap();
    settle().await;

    assert!(harness.log.entries().is_empty(), "no audio calls expected");
}

#[tokio::test(start_paused = true)]
async fn missing_amount_speaks_fallback_phrase() {
    let harness = spawn_service(Script::default());

    harness.handle.announce(record("Payment received")).unwrap();
    settle().await;

    let spoken: Vec<String> = harness
        .times
        .lock()
        .unwrap()
        .iter()
        .map(|(word, _)| word.clone())
        .collect();
    assert_eq!(spoken, vec!["Money", "received"]);
}

#[tokio::test(start_paused = true)]
async fn synthesis_failure_aborts_and_releases_focus_once() {
    let harness = spawn_service(Script {
        fail_index: Some(1),
        ..Script::default()
    });

    harness
        .handle
        .test_announcement("one two three", 1.0, 300)
        .unwrap();
    settle().await;

    let entries = harness.log.entries();
    assert!(entries.contains(&"speak two".to_string()));
    assert!(
        !entries.contains(&"speak three".to_string()),
        "remaining words must be discarded after a synthesis failure"
    );
    assert_eq!(harness.log.count("focus released"), 1);
}

#[tokio::test(start_paused = true)]
async fn tone_failure_still_speaks() {
    let harness = spawn_service(Script {
        tone_fails: true,
        ..Script::default()
    });

    harness.handle.test_announcement("hello", 1.0, 100).unwrap();
    settle().await;

    let entries = harness.log.entries();
    assert!(entries.contains(&"tone".to_string()));
    assert!(entries.contains(&"speak hello".to_string()));
    assert_eq!(harness.log.count("focus released"), 1);
}

#[tokio::test(start_paused = true)]
async fn new_announcement_preempts_the_active_run() {
    // words never complete on their own, so the first run hangs mid-word
    let harness = spawn_service(Script {
        auto_complete: Some(false),
        ..Script::default()
    });

    harness.handle.test_announcement("first run", 1.0, 300).unwrap();
    settle().await;
    assert_eq!(harness.log.count("speak first"), 1);

    harness.handle.test_announcement("second run", 1.0, 300).unwrap();
    settle().await;

    let entries = harness.log.entries();
    assert_eq!(harness.log.count("flush"), 1);
    assert_eq!(harness.log.count("focus released"), 1, "old grant released once");
    assert_eq!(harness.log.count("focus acquired"), 2);
    assert!(entries.contains(&"speak second".to_string()));
    assert!(
        !entries.contains(&"speak run".to_string()),
        "first run must not advance past its flushed word"
    );
}

#[tokio::test(start_paused = true)]
async fn stale_completion_after_preemption_is_discarded() {
    let harness = spawn_service(Script {
        auto_complete: Some(false),
        ..Script::default()
    });

    harness.handle.test_announcement("first run", 1.0, 300).unwrap();
    settle().await;
    harness.handle.test_announcement("second", 1.0, 300).unwrap();
    settle().await;

    // completion for the preempted run's word arrives late
    harness.events.post(SequencerEvent::UtteranceDone {
        utterance: UtteranceId {
            generation: 1,
            index: 0,
        },
    });
    settle().await;

    // the stale event must not advance the current run past its own word
    assert_eq!(harness.log.count("speak run"), 0);
    assert_eq!(harness.log.count("focus released"), 1);
}

#[tokio::test(start_paused = true)]
async fn ignore_while_busy_rejects_the_second_request() {
    let config = AppConfig {
        overlap_policy: OverlapPolicy::IgnoreWhileBusy,
        ..AppConfig::default()
    };
    let harness = spawn_service(Script {
        auto_complete: Some(false),
        config: Some(config),
        ..Script::default()
    });

    harness.handle.test_announcement("first", 1.0, 300).unwrap();
    settle().await;
    harness.handle.test_announcement("second", 1.0, 300).unwrap();
    settle().await;

    assert_eq!(harness.log.count("speak first"), 1);
    assert_eq!(harness.log.count("speak second"), 0);
    assert_eq!(harness.log.count("tone"), 1);
}

#[tokio::test(start_paused = true)]
async fn unready_speech_backend_rejects_at_the_boundary() {
    let harness = spawn_service(Script {
        speech_ready: Some(false),
        ..Script::default()
    });

    harness.handle.test_announcement("hello", 1.0, 300).unwrap();
    settle().await;

    assert!(
        harness.log.entries().is_empty(),
        "no focus, tone, or speech when the engine is not ready"
    );
}
