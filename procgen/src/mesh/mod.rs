//! Mesh generation and modification
//!
//! Generators return an indexed [`MeshData`] that always passes
//! [`MeshData::validate`]. Out-of-range parameters are clamped with a
//! warning rather than rejected.
//!
//! # Example
//! ```
//! use procgen::mesh::*;
//!
//! let planet = generate_icosphere(&IcosphereParams {
//!     radius: 2.0,
//!     subdivisions: 3,
//!     ..Default::default()
//! });
//! assert!(planet.validate().is_ok());
//!
//! let crate_box = generate_cube(&CubeParams {
//!     corner_radius: 0.2,
//!     segments: 4,
//!     ..Default::default()
//! });
//! let scene = combine(&[&planet, &crate_box]);
//! assert_eq!(
//!     scene.vertex_count(),
//!     planet.vertex_count() + crate_box.vertex_count()
//! );
//! ```

mod types;

pub mod aircraft;
pub mod combine;
pub mod cube;
pub mod displacement;
pub mod icosphere;
pub mod modifiers;

pub use types::{MeshData, Vertex};

// Convenience re-exports
pub use aircraft::{AircraftParams, AircraftShape, AircraftStyle, generate_aircraft};
pub use combine::{combine, combine_transformed};
pub use cube::{CubeParams, CubeUvMode, generate_cube};
pub use displacement::{DisplacementParams, Patch, displacement_patches, generate_displaced_sphere};
pub use icosphere::{IcosphereParams, MidpointCache, generate_icosphere, sphere_uv, subdivide};
pub use modifiers::{MeshApply, MeshModifier, SmoothNormals, Transform};
