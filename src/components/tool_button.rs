use egui::{Color32, Response, Ui};

/// Square palette button with a text glyph, highlighted while selected
pub struct ToolButton<'a> {
    pub icon: &'a str,
    pub tooltip: &'a str,
    pub selected: bool,
}

impl<'a> ToolButton<'a> {
    pub fn new(icon: &'a str, tooltip: &'a str, selected: bool) -> Self {
        Self { icon, tooltip, selected }
    }

    pub fn show(&self, ui: &mut Ui) -> Response {
        let button_size = egui::vec2(32.0, 32.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                Color32::from_rgb(100, 181, 246)
            } else if response.hovered() {
                Color32::from_gray(40)
            } else {
                Color32::from_gray(30)
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);

            let text_color = if self.selected { Color32::BLACK } else { Color32::WHITE };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.icon,
                egui::FontId::proportional(20.0),
                text_color,
            );

            if self.selected {
                ui.painter().rect_stroke(
                    rect,
                    4.0,
                    egui::Stroke::new(2.0, Color32::from_rgb(33, 150, 243)),
                );
            }
        }

        response.on_hover_text(self.tooltip)
    }
}

/// Round color swatch; the current color gets a ring
pub fn swatch(ui: &mut Ui, color: Color32, selected: bool) -> Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(22.0, 22.0), egui::Sense::click());
    if ui.is_rect_visible(rect) {
        let radius = rect.width() / 2.0 - 2.0;
        ui.painter().circle_filled(rect.center(), radius, color);
        if selected || response.hovered() {
            ui.painter().circle_stroke(
                rect.center(),
                radius + 1.5,
                egui::Stroke::new(2.0, Color32::from_rgb(33, 150, 243)),
            );
        }
    }
    response
}
