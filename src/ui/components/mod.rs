//! UI components module
//!
//! Reusable widgets for the breathing screen. Each one borrows the current
//! `Presentation` and reports input as `UiEvent`s instead of mutating state.

pub mod breathing_circle;
pub mod phase_header;
pub mod settings_panel;
pub mod transport;

pub use breathing_circle::{BreathingCircle, CIRCLE_LABEL};
pub use phase_header::PhaseHeader;
pub use settings_panel::{
    SettingsPanel, APPLY_LABEL, BACKGROUND_SOUND_LABEL, CLOSE_LABEL, CYCLE_SOUND_LABEL,
};
pub use transport::{TransportControls, PAUSE_LABEL, PLAY_LABEL, SETTINGS_LABEL};
