//! Real audio backends for the announcer service
//!
//! Speech goes through the system TTS engine (espeak subprocess on Linux);
//! the bell tone is decoded and played with rodio. Both report lifecycle
//! back through the service event channel from their own threads.

mod speech;
mod tone;

pub use speech::SystemSpeech;
pub use tone::BellTone;
