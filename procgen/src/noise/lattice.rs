//! Lattice gradient noise and fractal (multi-octave) synthesis

use serde::{Deserialize, Serialize};

use crate::random::{hash2, seed_for};

/// Upper bound on octaves; each one is a full lattice evaluation
pub const MAX_OCTAVES: u32 = 24;

/// Corner gradients, selected by the low 3 bits of the corner hash
const GRADIENTS: [(f32, f32); 8] = [
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
];

/// Quintic smoothstep (6t^5 - 15t^4 + 10t^3)
#[inline]
pub(crate) fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Dot product of the hashed corner gradient with the offset to the sample
#[inline]
pub(crate) fn gradient_dot(ix: i32, iy: i32, seed: u32, dx: f32, dy: f32) -> f32 {
    let (gx, gy) = GRADIENTS[(hash2(ix, iy, seed) & 7) as usize];
    gx * dx + gy * dy
}

/// 2D lattice gradient noise, continuous, range approximately [-1, 1]
///
/// Non-finite coordinates produce 0.
pub fn perlin_noise(x: f32, y: f32, seed: u32) -> f32 {
    if !x.is_finite() || !y.is_finite() {
        return 0.0;
    }

    let x0 = x.floor();
    let y0 = y.floor();
    let ix = x0 as i32;
    let iy = y0 as i32;
    let fx = x - x0;
    let fy = y - y0;

    let u = fade(fx);
    let v = fade(fy);

    let n00 = gradient_dot(ix, iy, seed, fx, fy);
    let n10 = gradient_dot(ix.wrapping_add(1), iy, seed, fx - 1.0, fy);
    let n01 = gradient_dot(ix, iy.wrapping_add(1), seed, fx, fy - 1.0);
    let n11 = gradient_dot(ix.wrapping_add(1), iy.wrapping_add(1), seed, fx - 1.0, fy - 1.0);

    lerp(lerp(n00, n10, u), lerp(n01, n11, u), v)
}

/// Knobs for fractal Brownian motion
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalParams {
    /// Base frequency (lattice cells per unit)
    pub frequency: f32,
    /// Number of octaves summed
    pub octaves: u32,
    /// Amplitude multiplier per octave
    pub persistence: f32,
    /// Frequency multiplier per octave
    pub lacunarity: f32,
    /// Random seed
    pub seed: u32,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            seed: 0,
        }
    }
}

/// Sum `octaves` calls to `basis`, normalized by the summed amplitude
///
/// Each octave gets its own derived seed so octaves do not line up at the
/// origin.
pub(crate) fn fbm(x: f32, y: f32, params: &FractalParams, basis: fn(f32, f32, u32) -> f32) -> f32 {
    if params.octaves == 0 || params.frequency == 0.0 {
        return 0.0;
    }

    let mut total = 0.0;
    let mut amplitude = 1.0f32;
    let mut frequency = params.frequency;
    let mut max_value = 0.0;

    for octave in 0..params.octaves.min(MAX_OCTAVES) {
        total += basis(x * frequency, y * frequency, seed_for(params.seed, octave)) * amplitude;
        max_value += amplitude.abs();
        amplitude *= params.persistence;
        frequency *= params.lacunarity;
    }

    if max_value > 0.0 { total / max_value } else { 0.0 }
}

/// Multi-octave lattice noise, output in [-1, 1]
///
/// Zero octaves or zero frequency give flat 0.
pub fn fractal_noise(x: f32, y: f32, params: &FractalParams) -> f32 {
    fbm(x, y, params, perlin_noise)
}
