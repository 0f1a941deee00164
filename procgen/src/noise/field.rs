//! Sum-type dispatcher over the noise evaluators

use ::noise::NoiseFn;
use serde::{Deserialize, Serialize};

use super::cellular::{CellularParams, cellular_noise};
use super::lattice::{FractalParams, fbm, perlin_noise};
use super::simplex::simplex_noise;
use super::voronoi::{VoronoiMode, VoronoiParams, voronoi_noise};

/// Which evaluator a [`NoiseField`] samples
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoiseKind {
    /// Single-octave lattice gradient noise
    #[default]
    Perlin,
    /// Simplified simplex noise (honours `octaves`)
    Simplex,
    /// Multi-octave lattice noise
    Fractal,
    /// Cellular-automaton density
    Cellular,
    /// Distance to nearest jittered point
    Voronoi,
    /// Distance between nearest and second nearest point
    VoronoiEdge,
}

/// A fully parameterized 2D scalar field
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseField {
    pub kind: NoiseKind,
    pub seed: u32,
    /// Cells per unit of input coordinate
    pub frequency: f32,
    pub octaves: u32,
    pub persistence: f32,
    pub lacunarity: f32,
    /// Voronoi feature point jitter (0.0 to 1.0)
    pub jitter: f32,
    /// Cellular initial fill ratio (0.0 to 1.0)
    pub fill: f32,
}

impl Default for NoiseField {
    fn default() -> Self {
        Self {
            kind: NoiseKind::Perlin,
            seed: 0,
            frequency: 8.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            jitter: 1.0,
            fill: 0.45,
        }
    }
}

impl NoiseField {
    /// Create a field of the given kind with default knobs
    pub fn new(kind: NoiseKind, seed: u32) -> Self {
        Self {
            kind,
            seed,
            ..Default::default()
        }
    }

    fn fractal_params(&self) -> FractalParams {
        FractalParams {
            frequency: self.frequency,
            octaves: self.octaves,
            persistence: self.persistence,
            lacunarity: self.lacunarity,
            seed: self.seed,
        }
    }

    /// Whether [`sample`](Self::sample) is centred on zero ([-1, 1]) rather than in [0, 1]
    pub fn is_signed(&self) -> bool {
        matches!(
            self.kind,
            NoiseKind::Perlin | NoiseKind::Simplex | NoiseKind::Fractal
        )
    }

    /// Raw field value: [-1, 1] for gradient kinds, [0, 1] for cellular and Voronoi kinds
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        match self.kind {
            NoiseKind::Perlin => {
                if self.frequency == 0.0 {
                    0.0
                } else {
                    perlin_noise(x * self.frequency, y * self.frequency, self.seed)
                }
            }
            NoiseKind::Simplex => fbm(x, y, &self.fractal_params(), simplex_noise),
            NoiseKind::Fractal => fbm(x, y, &self.fractal_params(), perlin_noise),
            NoiseKind::Cellular => cellular_noise(
                x,
                y,
                &CellularParams {
                    frequency: self.frequency,
                    fill: self.fill,
                    seed: self.seed,
                },
            ),
            NoiseKind::Voronoi | NoiseKind::VoronoiEdge => voronoi_noise(
                x,
                y,
                &VoronoiParams {
                    frequency: self.frequency,
                    jitter: self.jitter,
                    seed: self.seed,
                    mode: if self.kind == NoiseKind::Voronoi {
                        VoronoiMode::Distance
                    } else {
                        VoronoiMode::Edge
                    },
                },
            ),
        }
    }

    /// Field value remapped to [0, 1]
    pub fn sample_unit(&self, x: f32, y: f32) -> f32 {
        let v = self.sample(x, y);
        if self.is_signed() {
            ((v + 1.0) * 0.5).clamp(0.0, 1.0)
        } else {
            v
        }
    }
}

impl NoiseFn<f64, 2> for NoiseField {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0] as f32, point[1] as f32) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [NoiseKind; 6] = [
        NoiseKind::Perlin,
        NoiseKind::Simplex,
        NoiseKind::Fractal,
        NoiseKind::Cellular,
        NoiseKind::Voronoi,
        NoiseKind::VoronoiEdge,
    ];

    #[test]
    fn test_sample_unit_range_for_all_kinds() {
        for kind in KINDS {
            let field = NoiseField::new(kind, 31);
            for y in 0..32 {
                for x in 0..32 {
                    let v = field.sample_unit(x as f32 / 32.0, y as f32 / 32.0);
                    assert!((0.0..=1.0).contains(&v), "{:?} gave {}", kind, v);
                }
            }
        }
    }

    #[test]
    fn test_zero_frequency_is_flat() {
        for kind in KINDS {
            let field = NoiseField {
                kind,
                frequency: 0.0,
                ..Default::default()
            };
            let a = field.sample(0.1, 0.2);
            let b = field.sample(0.7, 0.9);
            assert_eq!(a, b, "{:?} not flat", kind);
        }
    }

    #[test]
    fn test_noise_fn_matches_sample() {
        let field = NoiseField::new(NoiseKind::Fractal, 5);
        let direct = field.sample(0.25, 0.75) as f64;
        assert_eq!(field.get([0.25, 0.75]), direct);
    }

    fn remap_generic<N: NoiseFn<f64, 2>>(source: &N, point: [f64; 2]) -> f64 {
        source.get(point) * 0.5 + 0.5
    }

    #[test]
    fn test_usable_as_generic_noise_fn() {
        let field = NoiseField::new(NoiseKind::Perlin, 2);
        let v = remap_generic(&field, [0.3, 0.6]);
        assert!((0.0..=1.0).contains(&v));
    }
}
