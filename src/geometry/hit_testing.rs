use egui::Pos2;

use crate::stroke::Stroke;

/// Distance from `p` to the segment `a..b`
pub fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Whether an eraser of `radius` at `pos` touches the stroke.
///
/// The stroke's own half-width counts towards the hit distance.
pub fn stroke_hit(stroke: &Stroke, pos: Pos2, radius: f32) -> bool {
    let reach = radius + stroke.style().width / 2.0;
    let points = stroke.points();
    match points {
        [] => false,
        [single] => single.distance(pos) <= reach,
        _ => points
            .windows(2)
            .any(|w| distance_to_segment(pos, w[0], w[1]) <= reach),
    }
}

/// Cut the part of the stroke within `radius` of `pos` out of it.
///
/// Every segment is clipped against the eraser disc, so a boundary point is
/// added where the stroke enters and leaves it. Returns the surviving runs in
/// order, or `None` if the disc does not cut the stroke.
pub fn split_points(stroke: &Stroke, pos: Pos2, radius: f32) -> Option<Vec<Vec<Pos2>>> {
    let reach = radius + stroke.style().width / 2.0;
    let points = stroke.points();
    let (&first, _) = points.split_first()?;
    if points.len() == 1 {
        return (first.distance(pos) <= reach).then(Vec::new);
    }

    let mut cut = false;
    let mut runs = Vec::new();
    let mut current = Vec::new();
    if first.distance(pos) > reach {
        current.push(first);
    }
    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let Some((enter, leave)) = clip_segment(a, b, pos, reach) else {
            current.push(b);
            continue;
        };
        cut = true;
        let ab = b - a;
        if enter > 0.0 {
            current.push(a + ab * enter);
        }
        if current.len() > 1 {
            runs.push(std::mem::take(&mut current));
        } else {
            current.clear();
        }
        if leave < 1.0 {
            current.push(a + ab * leave);
            current.push(b);
        }
    }
    if !cut {
        return None;
    }
    if current.len() > 1 {
        runs.push(current);
    }
    Some(runs)
}

/// Range of `t` in `[0, 1]` where `a + t * (b - a)` lies strictly inside the disc
fn clip_segment(a: Pos2, b: Pos2, center: Pos2, reach: f32) -> Option<(f32, f32)> {
    let ab = b - a;
    let len = ab.length();
    if len <= f32::EPSILON {
        return (b.distance(center) <= reach).then_some((0.0, 1.0));
    }
    let dir = ab / len;
    let to_center = center - a;
    let along = to_center.dot(dir);
    let across = to_center.x * dir.y - to_center.y * dir.x;
    if across.abs() >= reach {
        return None;
    }
    let half_chord = (reach * reach - across * across).sqrt();
    let enter = ((along - half_chord) / len).max(0.0);
    let leave = ((along + half_chord) / len).min(1.0);
    (enter < leave).then_some((enter, leave))
}
