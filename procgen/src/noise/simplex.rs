//! Simplified 2D simplex noise
//!
//! Samples a skewed triangle lattice with the same hashed gradients as the
//! lattice noise. Statistically similar character, different artifacts
//! (no axis-aligned creases), cheaper per sample.

use super::lattice::gradient_dot;

/// Skew factor (sqrt(3) - 1) / 2
const F2: f32 = 0.366_025_4;
/// Unskew factor (3 - sqrt(3)) / 6
const G2: f32 = 0.211_324_87;
/// Brings the summed kernels to roughly [-1, 1]
const OUTPUT_SCALE: f32 = 70.0;

#[inline]
fn corner(ix: i32, iy: i32, seed: u32, x: f32, y: f32) -> f32 {
    let t = 0.5 - x * x - y * y;
    if t <= 0.0 {
        0.0
    } else {
        let t2 = t * t;
        t2 * t2 * gradient_dot(ix, iy, seed, x, y)
    }
}

/// 2D simplex-style noise, clamped to [-1, 1]
///
/// Non-finite coordinates produce 0.
pub fn simplex_noise(x: f32, y: f32, seed: u32) -> f32 {
    if !x.is_finite() || !y.is_finite() {
        return 0.0;
    }

    let s = (x + y) * F2;
    let i = (x + s).floor();
    let j = (y + s).floor();

    let t = (i + j) * G2;
    let x0 = x - (i - t);
    let y0 = y - (j - t);

    // Lower or upper triangle of the skewed cell
    let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

    let x1 = x0 - i1 as f32 + G2;
    let y1 = y0 - j1 as f32 + G2;
    let x2 = x0 - 1.0 + 2.0 * G2;
    let y2 = y0 - 1.0 + 2.0 * G2;

    let ii = i as i32;
    let jj = j as i32;

    let n0 = corner(ii, jj, seed, x0, y0);
    let n1 = corner(ii.wrapping_add(i1), jj.wrapping_add(j1), seed, x1, y1);
    let n2 = corner(ii.wrapping_add(1), jj.wrapping_add(1), seed, x2, y2);

    (OUTPUT_SCALE * (n0 + n1 + n2)).clamp(-1.0, 1.0)
}
