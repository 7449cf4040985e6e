//! Settings overlay
//!
//! Phase duration slider and sound toggles. Every control is disabled while
//! the session runs; the panel can still be closed.

use crate::session::{Presentation, MAX_PHASE_SECONDS, MIN_PHASE_SECONDS};
use crate::ui::state::UiEvent;
use crate::ui::theme::Theme;
use egui::{
    Align, Align2, Area, Checkbox, Frame, Id, Layout, Order, RichText, Slider, Stroke, Vec2,
    WidgetInfo, WidgetType,
};

const PANEL_WIDTH: f32 = 360.0;

/// Accessibility label of the close button
pub const CLOSE_LABEL: &str = "Cerrar configuración";
/// Label of the button at the bottom of the panel
pub const APPLY_LABEL: &str = "Aplicar cambios";
/// Label of the cycle sound checkbox
pub const CYCLE_SOUND_LABEL: &str = "Sonido de ciclo";
/// Label of the background sound checkbox
pub const BACKGROUND_SOUND_LABEL: &str = "Sonido de fondo (lluvia)";

/// Floating settings panel
pub struct SettingsPanel<'a> {
    presentation: &'a Presentation,
    theme: &'a Theme,
}

impl<'a> SettingsPanel<'a> {
    pub fn new(presentation: &'a Presentation, theme: &'a Theme) -> Self {
        Self {
            presentation,
            theme,
        }
    }

    /// Show the panel as a foreground overlay near the top of the window
    pub fn show(self, ctx: &egui::Context, events: &mut Vec<UiEvent>) {
        Area::new(Id::new("settings_overlay"))
            .order(Order::Foreground)
            .anchor(Align2::CENTER_TOP, Vec2::new(0.0, self.theme.spacing))
            .show(ctx, |ui| {
                Frame::none()
                    .fill(self.theme.bg_top.gamma_multiply(0.95))
                    .stroke(Stroke::new(1.0, self.theme.glass_stroke))
                    .rounding(self.theme.card_rounding)
                    .inner_margin(24.0)
                    .show(ui, |ui| {
                        ui.set_width(PANEL_WIDTH);
                        self.contents(ui, events);
                    });
            });
    }

    fn contents(&self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        let enabled = !self.presentation.running;

        ui.horizontal(|ui| {
            ui.label(
                RichText::new("Configuración")
                    .size(18.0)
                    .color(self.theme.text_primary),
            );
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let close = ui.add(
                    egui::Button::new(RichText::new("✕").color(self.theme.text_muted))
                        .min_size(Vec2::splat(32.0))
                        .rounding(16.0),
                );
                close.widget_info(|| WidgetInfo::labeled(WidgetType::Button, true, CLOSE_LABEL));
                if close.clicked() {
                    events.push(UiEvent::CloseSettings);
                }
            });
        });

        ui.add_space(self.theme.spacing);

        // Duration
        let duration = self.presentation.phase_duration_seconds;
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("Duración por fase")
                    .size(14.0)
                    .color(self.theme.text_secondary),
            );
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("{}s", duration))
                        .size(14.0)
                        .color(self.theme.text_muted)
                        .background_color(self.theme.glass_fill),
                );
            });
        });

        let mut value = duration;
        ui.spacing_mut().slider_width = PANEL_WIDTH;
        let slider = ui.add_enabled(
            enabled,
            Slider::new(&mut value, MIN_PHASE_SECONDS..=MAX_PHASE_SECONDS)
                .show_value(false)
                .step_by(1.0),
        );
        if slider.changed() && value != duration {
            events.push(UiEvent::SetDuration(value));
        }

        ui.columns(3, |cols| {
            let tick = |s: u32| {
                RichText::new(format!("{}s", s))
                    .size(12.0)
                    .color(self.theme.text_muted)
            };
            cols[0].label(tick(MIN_PHASE_SECONDS));
            cols[1].vertical_centered(|ui| {
                ui.label(tick((MIN_PHASE_SECONDS + MAX_PHASE_SECONDS) / 2));
            });
            cols[2].with_layout(Layout::right_to_left(Align::Min), |ui| {
                ui.label(tick(MAX_PHASE_SECONDS));
            });
        });

        ui.add_space(self.theme.spacing);

        // Sounds
        ui.label(
            RichText::new("Sonidos")
                .size(14.0)
                .color(self.theme.text_secondary),
        );

        let sounds = self.presentation.sounds;
        let mut cycle = sounds.cycle_sound_enabled;
        if ui
            .add_enabled(enabled, Checkbox::new(&mut cycle, CYCLE_SOUND_LABEL))
            .changed()
        {
            events.push(UiEvent::SetCycleSound(cycle));
        }

        let mut background = sounds.background_sound_enabled;
        if ui
            .add_enabled(enabled, Checkbox::new(&mut background, BACKGROUND_SOUND_LABEL))
            .changed()
        {
            events.push(UiEvent::SetBackgroundSound(background));
        }

        ui.add_space(self.theme.spacing_lg / 2.0);

        let apply = ui.add_sized(
            Vec2::new(PANEL_WIDTH, 44.0),
            egui::Button::new(RichText::new(APPLY_LABEL).color(self.theme.text_primary))
                .fill(self.theme.glass_fill)
                .stroke(Stroke::new(1.0, self.theme.glass_stroke))
                .rounding(12.0),
        );
        if apply.clicked() {
            events.push(UiEvent::CloseSettings);
        }
    }
}
