//! Values derived from the session for rendering
//!
//! Everything here is a pure function of phase, countdown, duration and the
//! run flag, so the view can be checked without a rendering harness.

use super::{Phase, Session, SoundConfig};

/// Scale of the circle at rest (end of exhale)
pub const SCALE_MIN: f32 = 1.0;
/// Scale of the circle with full lungs (end of inhale)
pub const SCALE_MAX: f32 = 1.5;

/// What the circle should be colored by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircleTint {
    /// Session is stopped, use the neutral color
    Idle,
    /// Session is running, use this phase's color
    Phase(Phase),
}

/// Fraction of the phase already elapsed, clamped to [0, 1]
///
/// A stopped session may carry a countdown larger than the duration; that
/// reads as "nothing elapsed".
pub fn elapsed_fraction(remaining_seconds: u32, phase_duration_seconds: u32) -> f32 {
    if phase_duration_seconds == 0 {
        return 0.0;
    }
    let elapsed = phase_duration_seconds as f32 - remaining_seconds as f32;
    (elapsed / phase_duration_seconds as f32).clamp(0.0, 1.0)
}

/// Circle scale for a phase and countdown
///
/// Grows linearly over Inhale, shrinks linearly over Exhale and holds the
/// end value through each hold, so the scale is continuous across phases.
pub fn circle_scale(phase: Phase, remaining_seconds: u32, phase_duration_seconds: u32) -> f32 {
    let span = SCALE_MAX - SCALE_MIN;
    let elapsed = elapsed_fraction(remaining_seconds, phase_duration_seconds);
    match phase {
        Phase::Inhale => SCALE_MIN + elapsed * span,
        Phase::HoldAfterInhale => SCALE_MAX,
        Phase::Exhale => SCALE_MAX - elapsed * span,
        Phase::HoldAfterExhale => SCALE_MIN,
    }
}

/// Everything the view needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    /// Phase label above the progress bar
    pub label: &'static str,
    /// Progress bar fill, 0.0 to 1.0
    pub progress: f32,
    /// Circle scale, 1.0 to 1.5
    pub scale: f32,
    /// Circle color key
    pub tint: CircleTint,
    /// Number shown inside the circle
    pub countdown: u32,
    /// Whether the settings overlay is visible
    pub settings_open: bool,
    /// Whether the session is running (selects play/pause affordance)
    pub running: bool,
    /// Per-phase duration shown in the footer and settings
    pub phase_duration_seconds: u32,
    /// Sound toggles shown in settings
    pub sounds: SoundConfig,
}

impl Presentation {
    /// Derive the presentation model from the session and UI flags
    pub fn from_session(session: &Session, settings_open: bool) -> Self {
        let running = session.is_running();
        Self {
            label: session.phase().label(),
            progress: session.elapsed_fraction(),
            scale: session.scale(),
            tint: if running {
                CircleTint::Phase(session.phase())
            } else {
                CircleTint::Idle
            },
            countdown: session.remaining_seconds(),
            settings_open,
            running,
            phase_duration_seconds: session.phase_duration_seconds(),
            sounds: session.sounds(),
        }
    }
}
