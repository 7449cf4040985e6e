//! Phase label and progress bar shown above the circle

use crate::session::Presentation;
use crate::timer::TICK_PERIOD;
use crate::ui::theme::Theme;
use egui::{Rect, RichText, Sense, Vec2, WidgetInfo, WidgetType};

const BAR_SIZE: Vec2 = Vec2::new(128.0, 4.0);

/// Phase name with a thin progress bar underneath
pub struct PhaseHeader<'a> {
    presentation: &'a Presentation,
    theme: &'a Theme,
}

impl<'a> PhaseHeader<'a> {
    pub fn new(presentation: &'a Presentation, theme: &'a Theme) -> Self {
        Self {
            presentation,
            theme,
        }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let label = ui.label(
            RichText::new(self.presentation.label)
                .size(30.0)
                .color(self.theme.text_primary),
        );
        let a11y = format!("Fase actual: {}", self.presentation.label);
        label.widget_info(|| WidgetInfo::labeled(WidgetType::Label, true, &a11y));

        ui.add_space(self.theme.spacing_sm);
        self.show_progress(ui);
    }

    fn show_progress(&self, ui: &mut egui::Ui) {
        let (rect, _) = ui.allocate_exact_size(BAR_SIZE, Sense::hover());

        // Glides linearly across one tick, matching the countdown cadence
        let progress = ui.ctx().animate_value_with_time(
            ui.id().with("phase_progress"),
            self.presentation.progress,
            TICK_PERIOD.as_secs_f32(),
        );

        if !ui.is_rect_visible(rect) {
            return;
        }

        let painter = ui.painter();
        let rounding = BAR_SIZE.y / 2.0;
        painter.rect_filled(rect, rounding, self.theme.progress_track);

        let fill_width = rect.width() * progress.clamp(0.0, 1.0);
        if fill_width > 0.0 {
            let fill = Rect::from_min_size(rect.min, Vec2::new(fill_width, rect.height()));
            painter.rect_filled(fill, rounding, self.theme.progress_fill);
        }
    }
}
