//! Point sequences for line and parabola previews.
//!
//! Everything in here is a pure function of its arguments. Math runs in `f64`
//! and is narrowed to [`Pos2`] on output.

use std::f64::consts::PI;

use egui::{Pos2, pos2};

use super::DrawBounds;
use crate::tool::PenMode;

/// One degree, the angular step of parabola sampling
const ANGLE_STEP: f64 = PI / 180.0;

/// Upper bound on angle increments for a single curve
pub const MAX_SAMPLE_STEPS: usize = 360;

/// Consecutive samples closer than this (horizontally) are skipped
const MIN_SAMPLE_SPACING: f64 = 1.0;

/// Mode-specific inputs of the curve generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParams {
    /// Parabola factor `k`, strictly positive. Larger values give a flatter curve.
    pub factor: f64,
    /// Open the parabola the other way
    pub reversed: bool,
}

impl CurveParams {
    pub fn new(factor: f64, reversed: bool) -> Self {
        Self { factor, reversed }
    }
}

/// Generate the preview point sequences for a drag from `start` to `end`.
///
/// Freehand produces nothing, Line produces exactly `[start, end]`, and
/// Parabola produces the sampled curve followed by a straight guide
/// `[start, end]` (or a single vertical segment when the drag has no
/// horizontal extent).
pub fn generate(
    mode: PenMode,
    start: Pos2,
    end: Pos2,
    params: CurveParams,
    bounds: &DrawBounds,
) -> Vec<Vec<Pos2>> {
    match mode {
        PenMode::Freehand => Vec::new(),
        PenMode::Line => vec![line(start, end)],
        PenMode::Parabola => parabola(start, end, params, bounds),
    }
}

pub fn line(start: Pos2, end: Pos2) -> Vec<Pos2> {
    vec![start, end]
}

/// Ballistic curve through `start` whose initial direction is `end - start`.
pub fn parabola(start: Pos2, end: Pos2, params: CurveParams, bounds: &DrawBounds) -> Vec<Vec<Pos2>> {
    let (ox, oy) = (f64::from(start.x), f64::from(start.y));
    let vx = f64::from(end.x) - ox;
    let vy = f64::from(end.y) - oy;
    let k = params.factor;

    if vx.abs() < f64::EPSILON {
        return vec![vertical_drop(start, vy, k, bounds)];
    }

    // y = a*x^2 + b*x + c through (ox, oy) with slope vy/vx there
    let sign = if params.reversed { -1.0 } else { 1.0 };
    let a = k / (2.0 * vx * vx) * sign;
    let b = vy / vx - k * ox / (vx * vx) * sign;
    let c = a * ox * ox - ox * vy / vx + oy;

    let step = if (vx < 0.0) ^ params.reversed {
        -ANGLE_STEP
    } else {
        ANGLE_STEP
    };

    let width = f64::from(bounds.width);
    let top = f64::from(bounds.top);
    let bottom = f64::from(bounds.bottom());

    let theta_start = (vy / vx).atan();
    let mut points = vec![start];
    let mut last_x = ox;

    for i in 1..=MAX_SAMPLE_STEPS {
        let theta = theta_start + step * i as f64;
        if !(-PI..=PI).contains(&theta) {
            break;
        }
        // The tangent of the curve at x is 2a*x + b
        let x = (theta.tan() - b) / (2.0 * a);
        if !(0.0..=width).contains(&x) {
            break;
        }
        if points.len() > 1 && (last_x - x).abs() < MIN_SAMPLE_SPACING {
            continue;
        }
        let y = (a * x + b) * x + c;
        points.push(pos2(x as f32, y as f32));
        last_x = x;
        if !(top..=bottom).contains(&y) {
            break;
        }
    }

    vec![points, line(start, end)]
}

/// Straight up-and-down throw: from the apex (clamped to the top of the area)
/// to the bottom of the area.
fn vertical_drop(start: Pos2, vy: f64, k: f64, bounds: &DrawBounds) -> Vec<Pos2> {
    let apex_y = if vy >= 0.0 {
        start.y
    } else {
        let apex = f64::from(start.y) - vy * vy / 2.0 / k;
        (apex as f32).max(bounds.top)
    };
    vec![pos2(start.x, apex_y), pos2(start.x, bounds.bottom())]
}

/// Apply a scroll adjustment `delta` to the apex height of the curve
/// `start -> end` and return the parabola factor that produces it.
///
/// Returns `k` unchanged when the adjustment would push the apex through zero
/// height or the result is not a usable factor.
pub fn adjust_curve_parameter(k: f64, start: Pos2, end: Pos2, delta: f64) -> f64 {
    let n = f64::from(end.y) - f64::from(start.y);
    let peak = n * n / 2.0 / k;
    if peak * delta < 0.0 && peak.abs() <= delta.abs() {
        return k;
    }
    let adjusted = n * n / 2.0 / (peak + delta);
    if adjusted.is_finite() && adjusted > 0.0 {
        adjusted
    } else {
        k
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bounds() -> DrawBounds {
        DrawBounds::new(1920.0, 1080.0, 0.0)
    }

    #[test]
    fn test_freehand_generates_nothing() {
        let out = generate(
            PenMode::Freehand,
            pos2(0.0, 0.0),
            pos2(10.0, 10.0),
            CurveParams::new(50.0, false),
            &bounds(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_vertical_throw_clamps_apex_to_top() {
        let b = DrawBounds::new(800.0, 600.0, 20.0);
        let out = parabola(pos2(100.0, 40.0), pos2(100.0, 0.0), CurveParams::new(1.0, false), &b);
        assert_eq!(out, vec![vec![pos2(100.0, 20.0), pos2(100.0, 620.0)]]);
    }

    #[test]
    fn test_vertical_throw_unclamped_apex() {
        // vy = -100, k = 50 => apex 100 above the start
        let out = parabola(pos2(10.0, 500.0), pos2(10.0, 400.0), CurveParams::new(50.0, false), &bounds());
        assert_eq!(out, vec![vec![pos2(10.0, 400.0), pos2(10.0, 1080.0)]]);
    }

    #[test]
    fn test_curve_stays_on_quadratic() {
        let start = pos2(100.0, 500.0);
        let end = pos2(200.0, 400.0);
        let k = 50.0;
        let out = parabola(start, end, CurveParams::new(k, false), &bounds());
        let (ox, oy) = (100.0_f64, 500.0_f64);
        let (vx, vy) = (100.0_f64, -100.0_f64);
        let a = k / (2.0 * vx * vx);
        for p in &out[0] {
            let x = f64::from(p.x);
            let expected = a * (x - ox) * (x - ox) + vy / vx * (x - ox) + oy;
            assert_relative_eq!(f64::from(p.y), expected, epsilon = 0.05);
        }
    }

    #[test]
    fn test_rightward_throw_moves_right() {
        let out = parabola(pos2(100.0, 500.0), pos2(200.0, 400.0), CurveParams::new(50.0, false), &bounds());
        let curve = &out[0];
        assert!(curve.len() > 2);
        assert!(curve.windows(2).all(|w| w[1].x > w[0].x));
    }

    #[test]
    fn test_leftward_throw_moves_left() {
        let out = parabola(pos2(900.0, 500.0), pos2(800.0, 400.0), CurveParams::new(50.0, false), &bounds());
        let curve = &out[0];
        assert!(curve.len() > 2);
        assert!(curve.windows(2).all(|w| w[1].x < w[0].x));
    }

    #[test]
    fn test_adjust_increases_peak() {
        let start = pos2(0.0, 200.0);
        let end = pos2(50.0, 100.0);
        // peak = 100^2 / 2 / 50 = 100
        let k = adjust_curve_parameter(50.0, start, end, 100.0);
        assert_relative_eq!(k, 25.0);
    }

    #[test]
    fn test_adjust_rejects_flip_through_zero() {
        let start = pos2(0.0, 200.0);
        let end = pos2(50.0, 190.0);
        // peak = 100 / 2 / 50 = 1, delta -1 would reach zero height
        assert_relative_eq!(adjust_curve_parameter(50.0, start, end, -1.0), 50.0);
        assert_relative_eq!(adjust_curve_parameter(50.0, start, end, -4.0), 50.0);
    }

    #[test]
    fn test_adjust_keeps_factor_for_flat_drag() {
        let k = adjust_curve_parameter(50.0, pos2(0.0, 10.0), pos2(30.0, 10.0), 3.0);
        assert_relative_eq!(k, 50.0);
    }
}
