//! Breathing circle component
//!
//! Draws the pulsing circle with its glow and countdown. Clicking it toggles
//! the session.

use crate::session::view::SCALE_MAX;
use crate::session::Presentation;
use crate::ui::theme::Theme;
use egui::{Align2, FontId, Sense, Vec2, WidgetInfo, WidgetType};

/// Radius of the circle at scale 1.0
pub const BASE_RADIUS: f32 = 96.0;

/// Seconds the circle takes to ease to a new scale
const SCALE_ANIMATION_SECONDS: f32 = 1.0;
/// Halo width at scale 1.0
const GLOW_BASE: f32 = 30.0;
/// Extra halo width per unit of scale above 1.0
const GLOW_PER_SCALE: f32 = 50.0;
const GLOW_LAYERS: usize = 8;

/// Accessibility label of the circle
pub const CIRCLE_LABEL: &str = "Círculo de respiración";

/// Pulsing breathing circle
pub struct BreathingCircle<'a> {
    presentation: &'a Presentation,
    theme: &'a Theme,
}

impl<'a> BreathingCircle<'a> {
    pub fn new(presentation: &'a Presentation, theme: &'a Theme) -> Self {
        Self {
            presentation,
            theme,
        }
    }

    /// Largest area the circle and its glow can cover
    pub fn max_extent() -> f32 {
        let glow = GLOW_BASE + (SCALE_MAX - 1.0) * GLOW_PER_SCALE;
        2.0 * (BASE_RADIUS * SCALE_MAX + glow)
    }

    /// Show the circle and return the click response
    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(Self::max_extent()), Sense::click());

        let scale = ui.ctx().animate_value_with_time(
            response.id.with("scale"),
            self.presentation.scale,
            SCALE_ANIMATION_SECONDS,
        );

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect.center(), scale, response.hovered());
        }

        response.widget_info(|| WidgetInfo::labeled(WidgetType::Button, true, CIRCLE_LABEL));

        let hint = if self.presentation.running {
            "Click para pausar (Espacio)"
        } else {
            "Click para comenzar (Espacio)"
        };
        response.on_hover_text(hint)
    }

    fn paint(&self, ui: &egui::Ui, center: egui::Pos2, scale: f32, hovered: bool) {
        let painter = ui.painter();
        let radius = BASE_RADIUS * scale;

        // Soft halo: stacked translucent rings fading outward
        let glow = GLOW_BASE + (scale - 1.0) * GLOW_PER_SCALE;
        for layer in (1..=GLOW_LAYERS).rev() {
            let t = layer as f32 / GLOW_LAYERS as f32;
            let alpha = (1.0 - t) * 0.5;
            painter.circle_filled(
                center,
                radius + glow * t,
                self.theme.glow.gamma_multiply(alpha),
            );
        }

        let mut fill = self.theme.circle_color(self.presentation.tint);
        if hovered {
            fill = fill.gamma_multiply(1.1);
        }
        painter.circle_filled(center, radius, fill);

        painter.text(
            center,
            Align2::CENTER_CENTER,
            self.presentation.countdown.to_string(),
            FontId::proportional(60.0),
            self.theme.text_primary,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_fits_largest_circle_and_glow() {
        // 1.5 * 96 + (30 + 0.5 * 50)
        assert_eq!(BreathingCircle::max_extent(), 2.0 * (144.0 + 55.0));
    }
}
