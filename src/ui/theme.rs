//! Theme and styling for the breathing screen
//!
//! Night-sky gradient with frosted-glass panels. Phase colors are a fixed
//! table indexed by cycle position.

use crate::session::CircleTint;
use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Vec2, Visuals};

/// Application theme configuration
#[derive(Clone, Debug)]
pub struct Theme {
    /// Background gradient, top-left
    pub bg_top: Color32,
    /// Background gradient, bottom-right
    pub bg_bottom: Color32,

    /// Frosted panel fill
    pub glass_fill: Color32,
    /// Frosted panel fill on hover
    pub glass_hover: Color32,
    /// Frosted panel border
    pub glass_stroke: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    /// Circle color per phase, in cycle order
    pub phase_colors: [Color32; 4],
    /// Circle color while stopped
    pub circle_idle: Color32,
    /// Halo around the circle
    pub glow: Color32,

    /// Progress bar track and fill
    pub progress_track: Color32,
    pub progress_fill: Color32,

    /// Border radius for cards/panels
    pub card_rounding: Rounding,

    /// Standard spacing
    pub spacing: f32,
    /// Large spacing
    pub spacing_lg: f32,
    /// Small spacing
    pub spacing_sm: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::night()
    }
}

impl Theme {
    /// Slate-to-violet night theme
    pub fn night() -> Self {
        Self {
            bg_top: Color32::from_rgb(15, 23, 42),     // Slate 900
            bg_bottom: Color32::from_rgb(76, 29, 149), // Violet 900

            glass_fill: Color32::from_white_alpha(26),
            glass_hover: Color32::from_white_alpha(51),
            glass_stroke: Color32::from_white_alpha(51),

            text_primary: Color32::WHITE,
            text_secondary: Color32::from_white_alpha(230),
            text_muted: Color32::from_white_alpha(153),

            phase_colors: [
                Color32::from_rgb(96, 165, 250), // Blue 400, inhale
                Color32::from_rgb(34, 211, 238), // Cyan 400, hold
                Color32::from_rgb(74, 222, 128), // Green 400, exhale
                Color32::from_rgb(45, 212, 191), // Teal 400, hold
            ],
            circle_idle: Color32::from_rgb(156, 163, 175), // Gray 400
            glow: Color32::from_rgba_unmultiplied(109, 130, 246, 102),

            progress_track: Color32::from_white_alpha(51),
            progress_fill: Color32::WHITE,

            card_rounding: Rounding::same(16.0),

            spacing: 16.0,
            spacing_lg: 40.0,
            spacing_sm: 8.0,
        }
    }

    /// Circle fill for the given tint
    pub fn circle_color(&self, tint: CircleTint) -> Color32 {
        match tint {
            CircleTint::Idle => self.circle_idle,
            CircleTint::Phase(phase) => self.phase_colors[phase.index()],
        }
    }

    /// Apply this theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        // Panels are transparent; the gradient is painted underneath
        visuals.panel_fill = Color32::TRANSPARENT;
        visuals.window_fill = self.bg_top;
        visuals.extreme_bg_color = self.progress_track;

        visuals.widgets.noninteractive.bg_fill = self.glass_fill;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_muted);

        visuals.widgets.inactive.bg_fill = self.glass_fill;
        visuals.widgets.inactive.weak_bg_fill = self.glass_fill;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_secondary);

        visuals.widgets.hovered.bg_fill = self.glass_hover;
        visuals.widgets.hovered.weak_bg_fill = self.glass_hover;
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.active.bg_fill = self.phase_colors[0];
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.selection.bg_fill = self.phase_colors[0];
        visuals.selection.stroke = Stroke::new(1.0, self.text_primary);

        visuals.window_rounding = self.card_rounding;
        visuals.window_stroke = Stroke::new(1.0, self.glass_stroke);

        ctx.set_visuals(visuals);

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = Vec2::splat(self.spacing_sm);
        style.spacing.button_padding = Vec2::new(self.spacing, self.spacing_sm);

        style.text_styles.insert(
            egui::TextStyle::Heading,
            FontId::new(30.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Body,
            FontId::new(14.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            FontId::new(15.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Small,
            FontId::new(12.0, FontFamily::Proportional),
        );

        ctx.set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Phase;

    #[test]
    fn test_idle_circle_is_neutral() {
        let theme = Theme::night();
        assert_eq!(theme.circle_color(CircleTint::Idle), theme.circle_idle);
    }

    #[test]
    fn test_each_phase_has_its_own_color() {
        let theme = Theme::night();
        let colors: Vec<Color32> = Phase::ALL
            .iter()
            .map(|p| theme.circle_color(CircleTint::Phase(*p)))
            .collect();
        for (i, a) in colors.iter().enumerate() {
            assert_ne!(*a, theme.circle_idle);
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
