//! System speech-synthesis backend
//!
//! TTS is only available through the `tts` crate on Windows/macOS - Linux
//! goes through an espeak subprocess instead. Each submitted word posts an
//! `UtteranceDone`/`UtteranceError` event when it finishes.

use ghanti_core::{EventSender, SequencerEvent, SpeechBackend, SpeechError, UtteranceId};

#[cfg(not(target_os = "linux"))]
mod engine {
    use std::time::Duration;

    use tracing::warn;

    use super::*;

    pub struct SystemSpeech {
        events: EventSender,
        tts: Option<tts::Tts>,
    }

    impl SystemSpeech {
        pub fn new(events: EventSender) -> Self {
            let tts = match tts::Tts::default() {
                Ok(mut engine) => {
                    // Slightly slow rate reads amounts more clearly
                    let _ = engine.set_rate(engine.normal_rate() * 0.9);
                    Some(engine)
                }
                Err(err) => {
                    warn!(%err, "speech engine unavailable; announcements will be rejected");
                    None
                }
            };
            Self { events, tts }
        }
    }

    impl SpeechBackend for SystemSpeech {
        fn is_ready(&self) -> bool {
            self.tts.is_some()
        }

        fn synthesize(
            &mut self,
            text: &str,
            volume: f32,
            utterance: UtteranceId,
        ) -> Result<(), SpeechError> {
            let Some(tts) = self.tts.as_mut() else {
                return Err(SpeechError::NotReady);
            };

            let min = tts.min_volume();
            let max = tts.max_volume();
            let _ = tts.set_volume(min + (max - min) * volume);

            tts.speak(text, true)
                .map_err(|e| SpeechError::Rejected {
                    reason: e.to_string(),
                })?;

            // The engine exposes no reliable per-utterance callback on every
            // platform, so poll for completion off-thread.
            let mut engine = tts.clone();
            let events = self.events.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(50));
                while engine.is_speaking().unwrap_or(false) {
                    std::thread::sleep(Duration::from_millis(25));
                }
                events.post(SequencerEvent::UtteranceDone { utterance });
            });
            Ok(())
        }

        fn flush(&mut self) {
            if let Some(tts) = self.tts.as_mut() {
                let _ = tts.stop();
            }
        }
    }
}

#[cfg(target_os = "linux")]
mod engine {
    use std::process::Command;

    use tracing::warn;

    use super::*;

    pub struct SystemSpeech {
        events: EventSender,
    }

    impl SystemSpeech {
        pub fn new(events: EventSender) -> Self {
            Self { events }
        }
    }

    impl SpeechBackend for SystemSpeech {
        fn is_ready(&self) -> bool {
            true
        }

        fn synthesize(
            &mut self,
            text: &str,
            volume: f32,
            utterance: UtteranceId,
        ) -> Result<(), SpeechError> {
            // espeak amplitude range is 0-200 with 100 as the default
            let amplitude = (volume.clamp(0.0, 1.0) * 100.0).round() as u32;
            let word = text.to_string();
            let events = self.events.clone();

            std::thread::spawn(move || {
                let result = Command::new("espeak")
                    .args(["-a", &amplitude.to_string(), "-s", "140"])
                    .arg(&word)
                    .output();

                match result {
                    Ok(output) if output.status.success() => {
                        events.post(SequencerEvent::UtteranceDone { utterance });
                    }
                    Ok(output) => {
                        warn!(status = %output.status, "espeak exited with failure");
                        events.post(SequencerEvent::UtteranceError { utterance });
                    }
                    Err(err) => {
                        warn!(%err, "failed to run espeak");
                        events.post(SequencerEvent::UtteranceError { utterance });
                    }
                }
            });
            Ok(())
        }

        fn flush(&mut self) {
            // Each word is its own short-lived espeak process; by the time a
            // preemption lands the process has usually exited on its own.
        }
    }
}

pub use engine::SystemSpeech;
