//! Voronoi / Worley distance fields

use serde::{Deserialize, Serialize};

use crate::random::{hash, hash2, unit_from_hash};

/// What the Voronoi field reports
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoronoiMode {
    /// Distance to the nearest cell point (F1)
    #[default]
    Distance,
    /// Second nearest minus nearest (F2 - F1), dark along cell borders
    Edge,
}

/// Parameters for [`voronoi_noise`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoronoiParams {
    /// Grid cells per unit
    pub frequency: f32,
    /// How far a cell point may stray from the cell centre (0.0 = regular grid, 1.0 = anywhere)
    pub jitter: f32,
    /// Random seed
    pub seed: u32,
    /// Output mode
    pub mode: VoronoiMode,
}

impl Default for VoronoiParams {
    fn default() -> Self {
        Self {
            frequency: 8.0,
            jitter: 1.0,
            seed: 0,
            mode: VoronoiMode::Distance,
        }
    }
}

/// Jittered feature point of lattice cell (ix, iy), in lattice space
#[inline]
fn feature_point(ix: i32, iy: i32, seed: u32, jitter: f32) -> (f32, f32) {
    let h = hash2(ix, iy, seed);
    let ox = 0.5 + (unit_from_hash(h) - 0.5) * jitter;
    let oy = 0.5 + (unit_from_hash(hash(h)) - 0.5) * jitter;
    (ix as f32 + ox, iy as f32 + oy)
}

/// Worley field over the 3x3 neighbourhood of the sample cell, clamped to [0, 1]
pub fn voronoi_noise(x: f32, y: f32, params: &VoronoiParams) -> f32 {
    if params.frequency == 0.0 || !x.is_finite() || !y.is_finite() {
        return 0.0;
    }

    let px = x * params.frequency;
    let py = y * params.frequency;
    let cx = px.floor() as i32;
    let cy = py.floor() as i32;
    let jitter = params.jitter.clamp(0.0, 1.0);

    let mut f1 = f32::MAX;
    let mut f2 = f32::MAX;
    for dy in -1..=1 {
        for dx in -1..=1 {
            let (fx, fy) = feature_point(cx.wrapping_add(dx), cy.wrapping_add(dy), params.seed, jitter);
            let d = ((fx - px) * (fx - px) + (fy - py) * (fy - py)).sqrt();
            if d < f1 {
                f2 = f1;
                f1 = d;
            } else if d < f2 {
                f2 = d;
            }
        }
    }

    match params.mode {
        VoronoiMode::Distance => f1.clamp(0.0, 1.0),
        VoronoiMode::Edge => (f2 - f1).clamp(0.0, 1.0),
    }
}
