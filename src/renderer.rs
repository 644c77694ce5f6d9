use egui::{Color32, Painter, Pos2, Vec2};

use crate::stroke::{StrokeRef, StrokeStyle};

/// Draws ink on the overlay surface.
///
/// Stroke points are surface-local; `origin` is where the surface starts on screen.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    origin: Vec2,
}

impl Renderer {
    pub fn new(origin: Pos2) -> Self {
        Self { origin: origin.to_vec2() }
    }

    pub fn draw_strokes(&self, painter: &Painter, strokes: &[StrokeRef]) {
        for stroke in strokes {
            self.draw_points(painter, stroke.points(), stroke.style());
        }
    }

    pub fn draw_points(&self, painter: &Painter, points: &[Pos2], style: &StrokeStyle) {
        let points: Vec<Pos2> = points.iter().map(|p| *p + self.origin).collect();
        let radius = style.width / 2.0;
        match points.as_slice() {
            [] => {}
            [single] => {
                painter.circle_filled(*single, radius, style.color);
            }
            [first, .., last] => {
                // Lines have butt ends; cap them so ink looks round
                painter.circle_filled(*first, radius, style.color);
                painter.circle_filled(*last, radius, style.color);
                painter.add(egui::Shape::line(points, egui::Stroke::new(style.width, style.color)));
            }
        }
    }

    /// Outline showing the eraser reach under the pointer
    pub fn draw_eraser_cursor(&self, painter: &Painter, screen_pos: Pos2, radius: f32) {
        painter.circle_stroke(screen_pos, radius, egui::Stroke::new(1.0, Color32::GRAY));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::Stroke;
    use egui::pos2;

    #[test]
    fn test_render_basics() {
        let ctx = egui::Context::default();
        let layer_id = egui::LayerId::background();
        let rect = egui::Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(100.0, 100.0));
        let painter = Painter::new(ctx, layer_id, rect);

        let stroke = Stroke::new_ref(vec![pos2(1.0, 1.0), pos2(50.0, 50.0)], StrokeStyle::default())
            .unwrap();
        let renderer = Renderer::new(pos2(10.0, 10.0));
        renderer.draw_strokes(&painter, &[stroke]);
        renderer.draw_points(&painter, &[pos2(3.0, 3.0)], &StrokeStyle::default());
        renderer.draw_points(&painter, &[], &StrokeStyle::default());
    }
}
