//! UI components and application module
//!
//! This module provides the egui/eframe-based user interface for Breathe.

mod app;
pub mod components;
mod screen;
mod state;
mod theme;

pub use app::BreatheApp;
pub use screen::BreathingScreen;
pub use state::{UiEvent, UiState};
pub use theme::Theme;
