//! Presentation-only state and the input events the view reports

/// Flags that only affect what is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiState {
    /// Whether the settings overlay is visible
    pub settings_open: bool,
}

/// Discrete user input reported by the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Click on the circle, the play/pause button, or Space
    ToggleRunning,
    /// Settings button
    OpenSettings,
    /// Close button or "Aplicar cambios"
    CloseSettings,
    /// Duration slider moved
    SetDuration(u32),
    /// Cycle sound checkbox changed
    SetCycleSound(bool),
    /// Background sound checkbox changed
    SetBackgroundSound(bool),
}
