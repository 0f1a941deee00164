//! Gradient shapes and color ramps

use std::f32::consts::TAU;

use super::{Color, ColorStop, GradientKind, GradientParams};

/// Sorted color stops, sampled by ramp position
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

impl ColorRamp {
    /// Build a ramp; stops are sorted by position
    pub fn new(stops: &[ColorStop]) -> Self {
        let mut stops = stops.to_vec();
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self { stops }
    }

    /// Color at position `t`
    ///
    /// Interpolates between the two nearest stops. Positions outside the
    /// stop range take the end color. A single stop is a solid color and
    /// an empty ramp yields [`Color::FALLBACK`].
    pub fn sample(&self, t: f32) -> Color {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Color::FALLBACK,
        };

        if t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.position {
                let span = b.position - a.position;
                if span <= f32::EPSILON {
                    return b.color;
                }
                return a.color.lerp(b.color, (t - a.position) / span);
            }
        }

        last.color
    }
}

/// Raw ramp position for a normalized coordinate, before scale and repeat
///
/// Linear runs 0..1 across x (rotated about the centre by `angle`). Radial
/// and diamond reach 1.0 at the edge midpoints. Angular sweeps [0, 1)
/// counter-clockwise starting at `angle`.
pub fn gradient_position(params: &GradientParams, u: f32, v: f32) -> f32 {
    let dx = u - params.center[0];
    let dy = v - params.center[1];
    match params.kind {
        GradientKind::Linear => {
            let (s, c) = params.angle.sin_cos();
            (u - 0.5) * c + (v - 0.5) * s + 0.5
        }
        GradientKind::Radial => (dx * dx + dy * dy).sqrt() * 2.0,
        GradientKind::Angular => ((dy.atan2(dx) - params.angle) / TAU).rem_euclid(1.0),
        GradientKind::Diamond => (dx.abs() + dy.abs()) * 2.0,
    }
}

/// Apply ramp scale then wrap into [0, 1) or clamp into [0, 1]
pub(crate) fn shape_position(t: f32, scale: f32, repeat: bool) -> f32 {
    let t = t * scale;
    if !t.is_finite() {
        return 0.0;
    }
    if repeat {
        t.rem_euclid(1.0)
    } else {
        t.clamp(0.0, 1.0)
    }
}
