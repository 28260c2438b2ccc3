use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::time::Duration;
use tracing::warn;

use crate::entities::GameEvent;

/// A short synthesized blip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub duration: Duration,
    pub volume: f32,
}

impl Tone {
    /// The cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Tone> {
        let (frequency, millis, volume) = match event {
            GameEvent::ShotFired => (880.0, 40, 0.05),
            GameEvent::EnemyDestroyed { .. } => (220.0, 90, 0.08),
            GameEvent::PlayerHit { .. } => (110.0, 160, 0.10),
            GameEvent::WaveCleared { .. } => (660.0, 200, 0.06),
            GameEvent::GameOver { .. } => (90.0, 600, 0.10),
            GameEvent::EnemyHit => return None,
        };
        Some(Tone {
            frequency,
            duration: Duration::from_millis(millis),
            volume,
        })
    }
}

/// Audio manager for playing sound effects
pub struct AudioManager {
    /// Output stream and its handle; `None` when muted or no device exists
    output: Option<(OutputStream, OutputStreamHandle)>,
}

impl AudioManager {
    /// Opens the default output device
    pub fn new() -> Result<Self, rodio::StreamError> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        Ok(Self {
            output: Some((stream, stream_handle)),
        })
    }

    /// An audio manager that never makes a sound
    pub fn silent() -> Self {
        Self { output: None }
    }

    /// Falls back to [`AudioManager::silent`] if no device can be opened
    pub fn open_or_silent(muted: bool) -> Self {
        if muted {
            return Self::silent();
        }
        Self::new().unwrap_or_else(|err| {
            warn!(error = %err, "failed to initialize audio, continuing without sound");
            Self::silent()
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    pub fn play_event(&self, event: &GameEvent) {
        if let Some(tone) = Tone::for_event(event) {
            self.play_tone(tone);
        }
    }

    pub fn play_tone(&self, tone: Tone) {
        let Some((_, stream_handle)) = &self.output else {
            return;
        };
        // Playback errors are not worth interrupting the game for
        if let Ok(sink) = Sink::try_new(stream_handle) {
            sink.set_volume(tone.volume);
            sink.append(
                SineWave::new(tone.frequency)
                    .take_duration(tone.duration)
                    .fade_in(Duration::from_millis(5)),
            );
            sink.detach();
        }
    }
}
