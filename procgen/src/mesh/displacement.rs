//! Terrain-like displaced spheres
//!
//! Random spherical-cap "patches" raise or sink an icosphere. Each patch
//! has a centre direction, an angular radius and a height, and contributes
//! a raised-cosine bump that falls to zero at its rim.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::icosphere::{IcosphereParams, MIN_RADIUS, generate_icosphere};
use super::MeshData;
use crate::random::HashRng;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplacementParams {
    pub radius: f32,
    pub subdivisions: u32,
    pub patch_count: u32,
    /// Patch height range, in world units (negative sinks the surface)
    pub min_height: f32,
    pub max_height: f32,
    /// Patch angular radius range, in radians
    pub min_angle: f32,
    pub max_angle: f32,
    pub seed: u32,
}

impl Default for DisplacementParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            subdivisions: 4,
            patch_count: 12,
            min_height: -0.05,
            max_height: 0.1,
            min_angle: 0.1,
            max_angle: 0.6,
            seed: 0,
        }
    }
}

/// One spherical-cap bump
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Patch {
    pub center: Vec3,
    /// Angular radius in radians
    pub angle: f32,
    pub height: f32,
}

impl Patch {
    /// Height contribution at unit direction `dir`
    #[inline]
    pub fn offset(&self, dir: Vec3) -> f32 {
        let d = dir.dot(self.center).clamp(-1.0, 1.0).acos();
        if d >= self.angle {
            return 0.0;
        }
        self.height * 0.5 * (1.0 + (PI * d / self.angle).cos())
    }
}

/// Draw the patch set for `params` (deterministic per seed)
pub fn displacement_patches(params: &DisplacementParams) -> Vec<Patch> {
    let mut rng = HashRng::new(params.seed);
    (0..params.patch_count)
        .map(|_| {
            let center = rng.unit_vector();
            let angle = rng.range(params.min_angle, params.max_angle);
            let height = rng.range(params.min_height, params.max_height);
            Patch {
                center,
                angle,
                height,
            }
        })
        .filter(|p| p.angle > 0.0)
        .collect()
}

/// Generate a displaced sphere
///
/// Vertices move along their direction from the base sphere by the summed
/// patch offsets. Normals are left as the undisplaced direction, which is
/// accurate for gentle terrain and keeps shading smooth across patch rims.
pub fn generate_displaced_sphere(params: &DisplacementParams) -> MeshData {
    let radius = if params.radius > 0.0 && params.radius.is_finite() {
        params.radius
    } else {
        warn!(
            "generate_displaced_sphere: radius must be positive (got {}), clamping to {}",
            params.radius, MIN_RADIUS
        );
        MIN_RADIUS
    };

    let patches = displacement_patches(params);
    let mut mesh = generate_icosphere(&IcosphereParams {
        radius,
        subdivisions: params.subdivisions,
        fix_seam: true,
    });

    for v in &mut mesh.vertices {
        let dir = v.normal();
        let offset: f32 = patches.iter().map(|p| p.offset(dir)).sum();
        let r = (radius + offset).max(0.0);
        v.position = (dir * r).to_array();
    }

    debug!(
        patches = patches.len(),
        vertices = mesh.vertex_count(),
        "generated displaced sphere"
    );
    mesh
}
