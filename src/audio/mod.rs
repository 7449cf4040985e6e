//! Audio cues for the breathing session
//!
//! The UI never touches an audio device directly. It hands `AudioCommand`s
//! to an `AudioSink`, which is either the rodio-backed `AudioEngine` running
//! on its own thread or a `SilentAudio` fallback. Playback is best effort:
//! failures are logged and never reported back to the session.

#[cfg(feature = "audio-io")]
pub mod engine;
pub mod synth;

#[cfg(feature = "audio-io")]
pub use engine::AudioEngine;

use crate::session::SessionEffect;
use std::path::PathBuf;
use tracing::debug;

/// Command sent to the audio backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    /// Play the cycle cue from its beginning
    PlayCycleCue,
    /// Start the background ambience from its beginning, looping
    StartAmbience,
    /// Stop the background ambience
    StopAmbience,
    /// Stop the backend worker
    Shutdown,
}

impl From<SessionEffect> for AudioCommand {
    fn from(effect: SessionEffect) -> Self {
        match effect {
            SessionEffect::PlayCycleCue => AudioCommand::PlayCycleCue,
            SessionEffect::StartAmbience => AudioCommand::StartAmbience,
            SessionEffect::StopAmbience => AudioCommand::StopAmbience,
        }
    }
}

/// Where audio commands go
///
/// `dispatch` must return immediately; it is called from the UI thread.
pub trait AudioSink {
    fn dispatch(&mut self, command: AudioCommand);
}

/// Sink used when no output device is available
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn dispatch(&mut self, command: AudioCommand) {
        debug!("[AUDIO] Silent sink dropped {:?}", command);
    }
}

/// Sound files and levels for the two cues
///
/// A missing path means the built-in synthesized sound is used.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundAssets {
    /// Short sound played on every phase change
    pub cycle_cue_path: Option<PathBuf>,
    /// Long sound looped for the whole session
    pub ambience_path: Option<PathBuf>,
    /// Cue volume, 0.0 to 1.0
    pub cue_volume: f32,
    /// Ambience volume, 0.0 to 1.0
    pub ambience_volume: f32,
}

impl Default for SoundAssets {
    fn default() -> Self {
        Self {
            cycle_cue_path: None,
            ambience_path: None,
            cue_volume: 0.8,
            ambience_volume: 0.5,
        }
    }
}

/// Open the best available audio sink
///
/// Falls back to `SilentAudio` when the output device cannot be opened or
/// the crate was built without `audio-io`.
pub fn open_sink(assets: &SoundAssets) -> Box<dyn AudioSink> {
    #[cfg(feature = "audio-io")]
    {
        match AudioEngine::spawn(assets.clone()) {
            Ok(engine) => return Box::new(engine),
            Err(e) => e.log(),
        }
    }

    #[cfg(not(feature = "audio-io"))]
    {
        let _ = assets;
        tracing::warn!("[AUDIO] Built without audio-io; continuing without sound");
    }

    Box::new(SilentAudio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effects_map_to_commands() {
        assert_eq!(
            AudioCommand::from(SessionEffect::PlayCycleCue),
            AudioCommand::PlayCycleCue
        );
        assert_eq!(
            AudioCommand::from(SessionEffect::StartAmbience),
            AudioCommand::StartAmbience
        );
        assert_eq!(
            AudioCommand::from(SessionEffect::StopAmbience),
            AudioCommand::StopAmbience
        );
    }

    #[test]
    fn test_silent_sink_accepts_everything() {
        let mut sink = SilentAudio;
        sink.dispatch(AudioCommand::StartAmbience);
        sink.dispatch(AudioCommand::PlayCycleCue);
        sink.dispatch(AudioCommand::StopAmbience);
        sink.dispatch(AudioCommand::Shutdown);
    }

    #[test]
    fn test_default_assets_use_synth() {
        let assets = SoundAssets::default();
        assert!(assets.cycle_cue_path.is_none());
        assert!(assets.ambience_path.is_none());
        assert!(assets.cue_volume > assets.ambience_volume);
    }
}
