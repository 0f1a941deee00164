//! Closed-form two-color patterns

use std::f32::consts::TAU;

use super::{PatternKind, PatternParams};

/// Whether normalized coordinate (u, v) takes `color_a`
pub fn pattern_selects_a(params: &PatternParams, u: f32, v: f32) -> bool {
    let thickness = params.thickness.clamp(0.0, 1.0);
    let scale = params.scale;

    // Rotate about the texture centre
    let (s, c) = params.angle.sin_cos();
    let (cu, cv) = (u - 0.5, v - 0.5);
    let ru = cu * c - cv * s + 0.5;
    let rv = cu * s + cv * c + 0.5;

    match params.kind {
        PatternKind::Checkerboard => {
            let cx = (ru * scale).floor() as i64;
            let cy = (rv * scale).floor() as i64;
            (cx + cy).rem_euclid(2) == 0
        }
        PatternKind::Stripes => (ru * scale).rem_euclid(1.0) < thickness,
        PatternKind::Dots => {
            let fx = (ru * scale).rem_euclid(1.0) - 0.5;
            let fy = (rv * scale).rem_euclid(1.0) - 0.5;
            (fx * fx + fy * fy).sqrt() < thickness * 0.5
        }
        PatternKind::Grid => {
            let half = thickness * 0.5;
            let fx = (ru * scale).rem_euclid(1.0);
            let fy = (rv * scale).rem_euclid(1.0);
            fx.min(1.0 - fx) < half || fy.min(1.0 - fy) < half
        }
        PatternKind::Spiral => {
            let r = (cu * cu + cv * cv).sqrt();
            let theta = cv.atan2(cu) - params.angle;
            (r * scale + theta / TAU).rem_euclid(1.0) < thickness
        }
        PatternKind::Wave => {
            let offset = 0.25 * (ru * scale * TAU * 0.5).sin();
            (rv * scale + offset).rem_euclid(1.0) < thickness
        }
    }
}
