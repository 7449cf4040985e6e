//! Play/pause and settings buttons

use crate::session::Presentation;
use crate::ui::state::UiEvent;
use crate::ui::theme::Theme;
use egui::{Align, Layout, RichText, Stroke, Vec2, WidgetInfo, WidgetType};

const BUTTON_SIZE: f32 = 64.0;

/// Accessibility label of the play button
pub const PLAY_LABEL: &str = "Iniciar";
/// Accessibility label of the pause button
pub const PAUSE_LABEL: &str = "Pausar";
/// Accessibility label of the settings button
pub const SETTINGS_LABEL: &str = "Ajustes";

/// Row of round transport buttons
pub struct TransportControls<'a> {
    presentation: &'a Presentation,
    theme: &'a Theme,
}

impl<'a> TransportControls<'a> {
    pub fn new(presentation: &'a Presentation, theme: &'a Theme) -> Self {
        Self {
            presentation,
            theme,
        }
    }

    /// Show the buttons, pushing any resulting events
    pub fn show(self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        let row = Vec2::new(BUTTON_SIZE * 2.0 + self.theme.spacing, BUTTON_SIZE);
        ui.allocate_ui_with_layout(row, Layout::left_to_right(Align::Center), |ui| {
            ui.spacing_mut().item_spacing.x = self.theme.spacing;

            let running = self.presentation.running;
            let (icon, label) = if running {
                ("⏸", PAUSE_LABEL)
            } else {
                ("▶", PLAY_LABEL)
            };
            let play = ui.add(self.round_button(icon));
            play.widget_info(|| WidgetInfo::labeled(WidgetType::Button, true, label));
            if play.clicked() {
                events.push(UiEvent::ToggleRunning);
            }

            // Settings stay locked for the whole running session
            let settings = ui.add_enabled(!running, self.round_button("⚙"));
            settings.widget_info(|| {
                WidgetInfo::labeled(WidgetType::Button, !running, SETTINGS_LABEL)
            });
            if settings.clicked() {
                let event = if self.presentation.settings_open {
                    UiEvent::CloseSettings
                } else {
                    UiEvent::OpenSettings
                };
                events.push(event);
            }
        });
    }

    fn round_button(&self, icon: &str) -> egui::Button<'static> {
        egui::Button::new(RichText::new(icon).size(24.0).color(self.theme.text_primary))
            .min_size(Vec2::splat(BUTTON_SIZE))
            .rounding(BUTTON_SIZE / 2.0)
            .fill(self.theme.glass_fill)
            .stroke(Stroke::new(1.0, self.theme.glass_stroke))
    }
}
