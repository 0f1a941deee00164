//! Cellular-automaton density field
//!
//! Not noise in the gradient sense: a hashed binary grid run through one
//! life-like generation, giving stylized blotches.

use serde::{Deserialize, Serialize};

use crate::random::{hash2, unit_from_hash};

/// Parameters for [`cellular_noise`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellularParams {
    /// Grid cells per unit
    pub frequency: f32,
    /// Probability a cell starts alive (0.0 to 1.0)
    pub fill: f32,
    /// Random seed
    pub seed: u32,
}

impl Default for CellularParams {
    fn default() -> Self {
        Self {
            frequency: 16.0,
            fill: 0.45,
            seed: 0,
        }
    }
}

#[inline]
fn initially_alive(ix: i32, iy: i32, params: &CellularParams) -> bool {
    unit_from_hash(hash2(ix, iy, params.seed)) < params.fill
}

/// Density in [0, 1]: half from the cell's next-generation state, half
/// from the fraction of live neighbours
///
/// Birth on exactly 3 neighbours, survival on 2 or 3.
pub fn cellular_noise(x: f32, y: f32, params: &CellularParams) -> f32 {
    if params.frequency == 0.0 || !x.is_finite() || !y.is_finite() {
        return 0.0;
    }

    let cx = (x * params.frequency).floor() as i32;
    let cy = (y * params.frequency).floor() as i32;

    let mut neighbours = 0u32;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if (dx, dy) != (0, 0)
                && initially_alive(cx.wrapping_add(dx), cy.wrapping_add(dy), params)
            {
                neighbours += 1;
            }
        }
    }

    let alive = initially_alive(cx, cy, params);
    let next = if alive {
        (2..=3).contains(&neighbours)
    } else {
        neighbours == 3
    };

    let state = if next { 1.0 } else { 0.0 };
    0.5 * state + 0.5 * (neighbours as f32 / 8.0)
}
