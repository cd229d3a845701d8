//! Bell tone playback via rodio
//!
//! Looks for a user-supplied bell clip under the config sounds directory.
//! Playback runs on its own thread; completion or failure is posted back to
//! the service as a generation-tagged event.

use std::path::PathBuf;

use ghanti_core::{EventSender, SequencerEvent, ToneBackend, ToneError};

const CLIP_NAMES: [&str; 3] = ["bell.wav", "bell.ogg", "bell.mp3"];

pub struct BellTone {
    events: EventSender,
    sounds_dir: PathBuf,
}

impl BellTone {
    pub fn new(events: EventSender, sounds_dir: PathBuf) -> Self {
        Self { events, sounds_dir }
    }

    fn clip_path(&self) -> Option<PathBuf> {
        CLIP_NAMES
            .iter()
            .map(|name| self.sounds_dir.join(name))
            .find(|path| path.exists())
    }
}

impl ToneBackend for BellTone {
    fn play(&mut self, generation: u64) -> Result<(), ToneError> {
        let Some(path) = self.clip_path() else {
            return Err(ToneError::MissingClip {
                path: self.sounds_dir.join(CLIP_NAMES[0]),
            });
        };

        let events = self.events.clone();
        std::thread::spawn(move || {
            use rodio::{Decoder, OutputStream, Sink};
            use std::fs::File;
            use std::io::BufReader;

            let Ok((_stream, stream_handle)) = OutputStream::try_default() else {
                events.post(SequencerEvent::ToneError { generation });
                return;
            };
            let Ok(file) = File::open(&path) else {
                events.post(SequencerEvent::ToneError { generation });
                return;
            };
            let Ok(source) = Decoder::new(BufReader::new(file)) else {
                events.post(SequencerEvent::ToneError { generation });
                return;
            };
            let Ok(sink) = Sink::try_new(&stream_handle) else {
                events.post(SequencerEvent::ToneError { generation });
                return;
            };

            sink.append(source);
            sink.sleep_until_end();
            events.post(SequencerEvent::ToneComplete { generation });
        });
        Ok(())
    }
}
