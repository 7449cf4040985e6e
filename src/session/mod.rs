//! Breathing session state machine
//!
//! `Session` owns the run flag, the current phase, the countdown and the
//! sound settings. Every mutation goes through one of the transition
//! methods, which return the audio side effect (if any) as a value instead
//! of performing it. The controller decides where that effect goes.

mod phase;
pub mod view;

pub use phase::Phase;
pub use view::{CircleTint, Presentation};

use tracing::{debug, info};

/// Shortest allowed phase duration in seconds
pub const MIN_PHASE_SECONDS: u32 = 2;
/// Longest allowed phase duration in seconds
pub const MAX_PHASE_SECONDS: u32 = 8;
/// Phase duration on a fresh session
pub const DEFAULT_PHASE_SECONDS: u32 = 4;

/// Audio side effect requested by a session transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    /// Play the short cycle cue from its beginning
    PlayCycleCue,
    /// Start the background ambience from its beginning
    StartAmbience,
    /// Stop the background ambience
    StopAmbience,
}

/// Which sounds the session is allowed to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundConfig {
    /// Play the cue on every phase change
    pub cycle_sound_enabled: bool,
    /// Play the ambience for the whole running session
    pub background_sound_enabled: bool,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            cycle_sound_enabled: true,
            background_sound_enabled: true,
        }
    }
}

/// Breathing session state
///
/// While running, `0 <= remaining_seconds <= phase_duration_seconds` always
/// holds. Stopping rewinds to Inhale with a full countdown. The duration may
/// still be changed under a stopped countdown; the next start resynchronizes
/// both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    running: bool,
    phase: Phase,
    remaining_seconds: u32,
    phase_duration_seconds: u32,
    sounds: SoundConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a stopped session at Inhale with the default duration
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_PHASE_SECONDS, SoundConfig::default())
    }

    /// Create a stopped session with the given duration and sound settings
    ///
    /// The duration is clamped to the allowed range.
    pub fn with_settings(phase_duration_seconds: u32, sounds: SoundConfig) -> Self {
        let duration = clamp_duration(phase_duration_seconds);
        Self {
            running: false,
            phase: Phase::Inhale,
            remaining_seconds: duration,
            phase_duration_seconds: duration,
            sounds,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn phase_duration_seconds(&self) -> u32 {
        self.phase_duration_seconds
    }

    pub fn sounds(&self) -> SoundConfig {
        self.sounds
    }

    /// Flip between running and stopped
    pub fn toggle(&mut self) -> Option<SessionEffect> {
        if self.running {
            Some(self.stop())
        } else {
            self.start()
        }
    }

    /// Start a fresh session from Inhale with a full countdown
    ///
    /// Returns the ambience start when background sound is enabled. Calling
    /// this on a running session does nothing.
    pub fn start(&mut self) -> Option<SessionEffect> {
        if self.running {
            debug!("[SESSION] Already running, ignoring start");
            return None;
        }

        self.running = true;
        self.phase = Phase::Inhale;
        self.remaining_seconds = self.phase_duration_seconds;
        info!(
            "[SESSION] Started ({}s per phase)",
            self.phase_duration_seconds
        );

        self.sounds
            .background_sound_enabled
            .then_some(SessionEffect::StartAmbience)
    }

    /// Stop the session
    ///
    /// Always asks for the ambience to stop, even when already stopped or
    /// when background sound is disabled. Stopping a running session rewinds
    /// it to Inhale with a full countdown; stopping a stopped one changes
    /// nothing.
    pub fn stop(&mut self) -> SessionEffect {
        if self.running {
            info!(
                "[SESSION] Stopped during {} with {}s left",
                self.phase, self.remaining_seconds
            );
            self.running = false;
            self.phase = Phase::Inhale;
            self.remaining_seconds = self.phase_duration_seconds;
        }
        SessionEffect::StopAmbience
    }

    /// Count down one second
    ///
    /// When the countdown runs out the session advances exactly one phase,
    /// resets the countdown and asks for the cycle cue (if enabled).
    pub fn tick(&mut self) -> Option<SessionEffect> {
        if !self.running {
            return None;
        }

        if self.remaining_seconds <= 1 {
            self.phase = self.phase.next();
            self.remaining_seconds = self.phase_duration_seconds;
            debug!("[SESSION] Phase advanced to {}", self.phase);

            self.sounds
                .cycle_sound_enabled
                .then_some(SessionEffect::PlayCycleCue)
        } else {
            self.remaining_seconds -= 1;
            None
        }
    }

    /// Change the per-phase duration
    ///
    /// Rejected while running. The countdown is not touched; it picks up the
    /// new duration at the next start or phase change. Returns whether the
    /// value was accepted.
    pub fn set_phase_duration(&mut self, seconds: u32) -> bool {
        if self.running {
            debug!("[SESSION] Ignoring duration change while running");
            return false;
        }
        self.phase_duration_seconds = clamp_duration(seconds);
        true
    }

    /// Enable or disable the cycle cue. Rejected while running.
    pub fn set_cycle_sound(&mut self, enabled: bool) -> bool {
        if self.running {
            debug!("[SESSION] Ignoring cycle sound change while running");
            return false;
        }
        self.sounds.cycle_sound_enabled = enabled;
        true
    }

    /// Enable or disable the background ambience. Rejected while running.
    pub fn set_background_sound(&mut self, enabled: bool) -> bool {
        if self.running {
            debug!("[SESSION] Ignoring background sound change while running");
            return false;
        }
        self.sounds.background_sound_enabled = enabled;
        true
    }

    /// Fraction of the current phase already elapsed, clamped to [0, 1]
    pub fn elapsed_fraction(&self) -> f32 {
        view::elapsed_fraction(self.remaining_seconds, self.phase_duration_seconds)
    }

    /// Circle scale for the current phase and countdown
    pub fn scale(&self) -> f32 {
        view::circle_scale(
            self.phase,
            self.remaining_seconds,
            self.phase_duration_seconds,
        )
    }
}

fn clamp_duration(seconds: u32) -> u32 {
    seconds.clamp(MIN_PHASE_SECONDS, MAX_PHASE_SECONDS)
}
