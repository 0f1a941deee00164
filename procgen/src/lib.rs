//! Procedural content core for the scene engine
//!
//! Synthesizes textures and meshes from parametric descriptions and
//! evaluates closed-form orbital motion for the bodies that carry them.
//!
//! - [`random`]: hash-based deterministic randomness
//! - [`noise`]: lattice, simplex, fractal, cellular and Voronoi fields
//! - [`texture`]: noise/gradient/pattern/composite texture synthesis
//! - [`mesh`]: icospheres, rounded cubes, aircraft, displaced spheres
//! - [`orbit`]: elliptical orbits with banking orientation
//! - [`particles`]: pooled voxel-cloud and contrail elements
//!
//! Every generator is a pure function of its parameters (and seed). Nothing
//! here touches the GPU, the filesystem or global state.

pub mod error;
pub mod mesh;
pub mod noise;
pub mod orbit;
pub mod particles;
pub mod random;
pub mod texture;

pub use error::{MeshError, TextureError};
pub use mesh::{MeshData, Vertex};
pub use orbit::{OrbitParams, OrbitSample};
pub use particles::{ParticlePool, PoolParams};
pub use random::HashRng;
pub use texture::{Color, TextureData, TextureParams, generate_texture};
