//! Noise field library
//!
//! Lattice gradient noise, a simplified simplex variant, fractal synthesis,
//! a cellular-automaton density field and Voronoi distance fields. All
//! evaluators are pure functions of their coordinates, parameters and seed,
//! built on [`crate::random`].
//!
//! Degenerate parameters (zero frequency, zero octaves) give flat output
//! rather than an error.
//!
//! # Example
//! ```
//! use procgen::noise::*;
//!
//! let n = perlin_noise(1.3, 2.7, 42);
//! assert!((-1.0..=1.0).contains(&n));
//!
//! let field = NoiseField::new(NoiseKind::Voronoi, 7);
//! let v = field.sample_unit(0.5, 0.5);
//! assert!((0.0..=1.0).contains(&v));
//! ```

mod cellular;
mod field;
mod lattice;
mod simplex;
mod voronoi;

pub use cellular::{CellularParams, cellular_noise};
pub use field::{NoiseField, NoiseKind};
pub use lattice::{FractalParams, MAX_OCTAVES, fractal_noise, perlin_noise};
pub use simplex::simplex_noise;
pub use voronoi::{VoronoiMode, VoronoiParams, voronoi_noise};
