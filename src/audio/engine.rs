//! rodio-backed audio engine
//!
//! `rodio::OutputStream` is not `Send`, so the stream and its sinks live on
//! a dedicated worker thread. The UI talks to it through a bounded command
//! channel and never waits on playback.

use super::synth::{self, SYNTH_SAMPLE_RATE};
use super::{AudioCommand, AudioSink, SoundAssets};
use crate::{BreatheError, Result};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info, warn};

const COMMAND_QUEUE_SIZE: usize = 32;
const RAIN_LOOP_SECONDS: f32 = 4.0;

/// A sound ready to be played any number of times
#[derive(Clone)]
enum Sound {
    /// Encoded file contents, decoded on every play
    Encoded(Arc<[u8]>),
    /// Mono samples at `SYNTH_SAMPLE_RATE`
    Synth(Arc<Vec<f32>>),
}

impl Sound {
    /// Load a sound file, falling back to the synthesized sound on failure
    fn load_or(path: Option<&Path>, fallback: impl FnOnce() -> Vec<f32>) -> Self {
        if let Some(path) = path {
            match Self::load(path) {
                Ok(sound) => {
                    info!("[AUDIO] Loaded {}", path.display());
                    return sound;
                }
                Err(e) => e.log(),
            }
        }
        Sound::Synth(Arc::new(fallback()))
    }

    fn load(path: &Path) -> Result<Self> {
        let bytes: Arc<[u8]> = std::fs::read(path)
            .map_err(|e| {
                BreatheError::AudioDecodeError(format!("{}: {}", path.display(), e))
            })?
            .into();

        // Probe once so a bad file is rejected at startup, not mid-session
        Decoder::new(Cursor::new(Arc::clone(&bytes))).map_err(|e| {
            BreatheError::AudioDecodeError(format!("{}: {}", path.display(), e))
        })?;

        Ok(Sound::Encoded(bytes))
    }

    /// Start this sound from the beginning on a fresh sink
    fn play(&self, handle: &OutputStreamHandle, volume: f32, looping: bool) -> Result<Sink> {
        let sink = Sink::try_new(handle)
            .map_err(|e| BreatheError::AudioDeviceError(format!("Failed to open sink: {}", e)))?;
        sink.set_volume(volume);

        match self {
            Sound::Encoded(bytes) => {
                let source = Decoder::new(Cursor::new(Arc::clone(bytes)))
                    .map_err(|e| BreatheError::AudioDecodeError(e.to_string()))?;
                if looping {
                    sink.append(source.repeat_infinite());
                } else {
                    sink.append(source);
                }
            }
            Sound::Synth(samples) => {
                let source = SamplesBuffer::new(1, SYNTH_SAMPLE_RATE, samples.as_ref().clone());
                if looping {
                    sink.append(source.repeat_infinite());
                } else {
                    sink.append(source);
                }
            }
        }

        Ok(sink)
    }
}

/// State owned by the worker thread
struct Player {
    handle: OutputStreamHandle,
    cue: Sound,
    ambience: Sound,
    assets: SoundAssets,
    cue_sink: Option<Sink>,
    ambience_sink: Option<Sink>,
}

impl Player {
    fn apply(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::PlayCycleCue => {
                // Dropping the previous sink cuts a cue that is still ringing
                self.cue_sink = None;
                match self.cue.play(&self.handle, self.assets.cue_volume, false) {
                    Ok(sink) => self.cue_sink = Some(sink),
                    Err(e) => warn!("[AUDIO] Cycle cue failed: {}", e),
                }
            }
            AudioCommand::StartAmbience => {
                self.ambience_sink = None;
                match self
                    .ambience
                    .play(&self.handle, self.assets.ambience_volume, true)
                {
                    Ok(sink) => {
                        debug!("[AUDIO] Ambience started");
                        self.ambience_sink = Some(sink);
                    }
                    Err(e) => warn!("[AUDIO] Ambience failed: {}", e),
                }
            }
            AudioCommand::StopAmbience => {
                if let Some(sink) = self.ambience_sink.take() {
                    sink.stop();
                    debug!("[AUDIO] Ambience stopped");
                }
            }
            AudioCommand::Shutdown => {}
        }
    }
}

/// Audio engine running on its own thread
pub struct AudioEngine {
    command_tx: Sender<AudioCommand>,
    worker: Option<thread::JoinHandle<()>>,
}

impl AudioEngine {
    /// Open the default output device and start the worker
    ///
    /// Blocks until the worker has opened the device, so a missing device
    /// is reported here rather than swallowed later.
    pub fn spawn(assets: SoundAssets) -> Result<Self> {
        let (command_tx, command_rx) = bounded(COMMAND_QUEUE_SIZE);
        let (ready_tx, ready_rx) = bounded::<Result<()>>(1);

        let worker = thread::Builder::new()
            .name("breathe-audio".to_string())
            .spawn(move || run_worker(assets, command_rx, ready_tx))?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                command_tx,
                worker: Some(worker),
            }),
            Ok(Err(e)) => {
                let _ = worker.join();
                Err(e)
            }
            Err(_) => {
                let _ = worker.join();
                Err(BreatheError::ChannelError(
                    "Audio worker exited during startup".to_string(),
                ))
            }
        }
    }
}

impl AudioSink for AudioEngine {
    fn dispatch(&mut self, command: AudioCommand) {
        match self.command_tx.try_send(command) {
            Ok(()) => {}
            Err(TrySendError::Full(command)) => {
                warn!("[AUDIO] Command queue full, dropping {:?}", command);
            }
            Err(TrySendError::Disconnected(command)) => {
                error!("[AUDIO] Worker gone, dropping {:?}", command);
            }
        }
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        let _ = self.command_tx.send(AudioCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_worker(
    assets: SoundAssets,
    command_rx: Receiver<AudioCommand>,
    ready_tx: Sender<Result<()>>,
) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            let _ = ready_tx.send(Err(BreatheError::AudioDeviceError(format!(
                "Failed to open output stream: {}",
                e
            ))));
            return;
        }
    };

    let cue = Sound::load_or(assets.cycle_cue_path.as_deref(), || {
        synth::bell(SYNTH_SAMPLE_RATE)
    });
    let ambience = Sound::load_or(assets.ambience_path.as_deref(), || {
        synth::rain(SYNTH_SAMPLE_RATE, RAIN_LOOP_SECONDS)
    });

    let mut player = Player {
        handle,
        cue,
        ambience,
        assets,
        cue_sink: None,
        ambience_sink: None,
    };

    let _ = ready_tx.send(Ok(()));
    info!("[AUDIO] Worker ready");

    while let Ok(command) = command_rx.recv() {
        if command == AudioCommand::Shutdown {
            break;
        }
        player.apply(command);
    }

    info!("[AUDIO] Worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_synth() {
        let sound = Sound::load_or(Some(Path::new("/nonexistent/bell.mp3")), || vec![0.5; 4]);
        assert!(matches!(sound, Sound::Synth(ref s) if s.len() == 4));
    }

    #[test]
    fn test_undecodable_file_is_rejected() {
        let path = std::env::temp_dir().join("breathe_not_audio.wav");
        std::fs::write(&path, b"definitely not a wav file").unwrap();
        let result = Sound::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(BreatheError::AudioDecodeError(_))));
    }

    #[test]
    fn test_engine_lifecycle() {
        // Might not have an audio device in CI
        if let Ok(mut engine) = AudioEngine::spawn(SoundAssets::default()) {
            engine.dispatch(AudioCommand::StartAmbience);
            engine.dispatch(AudioCommand::PlayCycleCue);
            engine.dispatch(AudioCommand::StopAmbience);
            drop(engine);
        }
    }
}
