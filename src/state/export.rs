use std::path::Path;

use egui::{Color32, Pos2};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::{PersistenceError, PersistenceResult};
use crate::stroke::StrokeRef;

pub const PNG_EXTENSION: &str = ".png";
pub const EXPORT_PREFIX: &str = "ImageExport_";

/// Rasterize the strokes onto a `width` x `height` image.
///
/// Strokes are stamped as round discs along every segment, in drawing order.
/// Without a background the image stays transparent outside the ink.
pub fn render_strokes(
    strokes: &[StrokeRef],
    width: u32,
    height: u32,
    background: Option<Color32>,
) -> RgbaImage {
    let fill = background.map_or(Rgba([0, 0, 0, 0]), to_rgba);
    let mut image = RgbaImage::from_pixel(width, height, fill);

    for stroke in strokes {
        let color = to_rgba(stroke.style().color);
        let radius = (stroke.style().width / 2.0).max(0.5);
        let points = stroke.points();
        if let [single] = points {
            stamp(&mut image, *single, radius, color);
        }
        for segment in points.windows(2) {
            let (a, b) = (segment[0], segment[1]);
            let steps = a.distance(b).ceil().max(1.0) as usize;
            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                stamp(&mut image, a.lerp(b, t), radius, color);
            }
        }
    }
    image
}

/// Render and write a PNG
pub fn export_png(
    path: &Path,
    strokes: &[StrokeRef],
    width: u32,
    height: u32,
    background: Option<Color32>,
) -> PersistenceResult<()> {
    if strokes.is_empty() {
        return Err(PersistenceError::NothingToSave);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    render_strokes(strokes, width, height, background).save_with_format(path, ImageFormat::Png)?;
    log::info!("Exported {} stroke(s) to {}", strokes.len(), path.display());
    Ok(())
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Rgba([r, g, b, a])
}

fn stamp(image: &mut RgbaImage, center: Pos2, radius: f32, color: Rgba<u8>) {
    let (w, h) = (image.width() as i64, image.height() as i64);
    let x0 = ((center.x - radius).floor() as i64).max(0);
    let x1 = ((center.x + radius).ceil() as i64).min(w - 1);
    let y0 = ((center.y - radius).floor() as i64).max(0);
    let y1 = ((center.y + radius).ceil() as i64).min(h - 1);
    let r_sq = radius * radius;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - center.x;
            let dy = y as f32 + 0.5 - center.y;
            if dx * dx + dy * dy <= r_sq {
                image.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Stroke, StrokeStyle};
    use egui::pos2;

    #[test]
    fn test_render_marks_stroke_pixels_only() {
        let stroke = Stroke::new_ref(
            vec![pos2(2.0, 10.0), pos2(18.0, 10.0)],
            StrokeStyle::new(Color32::RED, 4.0),
        )
        .unwrap();
        let image = render_strokes(&[stroke], 20, 20, None);
        assert_eq!(image.get_pixel(10, 10), &Rgba([255, 0, 0, 255]));
        assert_eq!(image.get_pixel(10, 2)[3], 0);
    }

    #[test]
    fn test_off_canvas_stroke_is_clipped() {
        let stroke = Stroke::new_ref(
            vec![pos2(-50.0, -50.0), pos2(-40.0, -40.0)],
            StrokeStyle::new(Color32::RED, 4.0),
        )
        .unwrap();
        let image = render_strokes(&[stroke], 8, 8, None);
        assert!(image.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_background_fills_around_ink() {
        let stroke = Stroke::new_ref(vec![pos2(4.0, 4.0)], StrokeStyle::new(Color32::BLUE, 2.0)).unwrap();
        let image = render_strokes(&[stroke], 8, 8, Some(Color32::WHITE));
        assert_eq!(image.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(image.get_pixel(4, 4), &Rgba([0, 0, 255, 255]));
    }
}
