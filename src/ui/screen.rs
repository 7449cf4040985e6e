//! The breathing screen
//!
//! Lays out the phase header, circle, transport row and footer over a
//! gradient background, with the settings panel floating on top.

use crate::session::Presentation;
use crate::ui::components::{BreathingCircle, PhaseHeader, SettingsPanel, TransportControls};
use crate::ui::state::UiEvent;
use crate::ui::theme::Theme;
use egui::{CentralPanel, Color32, Frame, Key, LayerId, Mesh, Rect, RichText};

/// Height of everything stacked in the central column
const CONTENT_HEIGHT: f32 = 560.0;

/// Renders one frame of the breathing screen
pub struct BreathingScreen<'a> {
    presentation: &'a Presentation,
    theme: &'a Theme,
}

impl<'a> BreathingScreen<'a> {
    pub fn new(presentation: &'a Presentation, theme: &'a Theme) -> Self {
        Self {
            presentation,
            theme,
        }
    }

    /// Draw the screen and return the input gathered this frame
    pub fn show(self, ctx: &egui::Context) -> Vec<UiEvent> {
        let mut events = Vec::new();

        self.paint_background(ctx);

        CentralPanel::default()
            .frame(Frame::none())
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    let slack = (ui.available_height() - CONTENT_HEIGHT) / 2.0;
                    ui.add_space(slack.max(self.theme.spacing));

                    PhaseHeader::new(self.presentation, self.theme).show(ui);

                    ui.add_space(self.theme.spacing);

                    if BreathingCircle::new(self.presentation, self.theme)
                        .show(ui)
                        .clicked()
                    {
                        events.push(UiEvent::ToggleRunning);
                    }

                    ui.add_space(self.theme.spacing);

                    TransportControls::new(self.presentation, self.theme).show(ui, &mut events);

                    ui.add_space(self.theme.spacing_lg / 2.0);

                    ui.label(
                        RichText::new(format!(
                            "Sigue el círculo para una respiración relajante • {}s por fase",
                            self.presentation.phase_duration_seconds
                        ))
                        .size(14.0)
                        .color(self.theme.text_muted),
                    );

                    // Space toggles unless a widget (e.g. the slider) has focus
                    let space_pressed = ui.input(|i| i.key_pressed(Key::Space));
                    let any_widget_focused = ui.memory(|m| m.focused().is_some());
                    if space_pressed && !any_widget_focused {
                        events.push(UiEvent::ToggleRunning);
                    }
                });
            });

        if self.presentation.settings_open {
            SettingsPanel::new(self.presentation, self.theme).show(ctx, &mut events);
        }

        events
    }

    /// Diagonal gradient from `bg_top` (top-left) to `bg_bottom` (bottom-right)
    fn paint_background(&self, ctx: &egui::Context) {
        let rect = ctx.screen_rect();
        let painter = ctx.layer_painter(LayerId::background());
        let mid = mix(self.theme.bg_top, self.theme.bg_bottom);
        painter.add(gradient_mesh(
            rect,
            [self.theme.bg_top, mid, self.theme.bg_bottom, mid],
        ));
    }
}

/// Quad with one color per corner: top-left, top-right, bottom-right, bottom-left
fn gradient_mesh(rect: Rect, colors: [Color32; 4]) -> Mesh {
    let mut mesh = Mesh::default();
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ];
    for (pos, color) in corners.into_iter().zip(colors) {
        mesh.colored_vertex(pos, color);
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    mesh
}

fn mix(a: Color32, b: Color32) -> Color32 {
    let avg = |x: u8, y: u8| ((x as u16 + y as u16) / 2) as u8;
    Color32::from_rgb(avg(a.r(), b.r()), avg(a.g(), b.g()), avg(a.b(), b.b()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_mesh_covers_rect() {
        let rect = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(100.0, 50.0));
        let mesh = gradient_mesh(rect, [Color32::RED; 4]);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.calc_bounds(), rect);
    }

    #[test]
    fn test_mix_is_midpoint() {
        let c = mix(Color32::from_rgb(0, 100, 200), Color32::from_rgb(100, 200, 0));
        assert_eq!(c, Color32::from_rgb(50, 150, 100));
    }
}
