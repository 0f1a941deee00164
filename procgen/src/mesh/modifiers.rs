//! Mesh modifiers for procedural geometry
//!
//! Modifiers operate on [`MeshData`] in place.
//!
//! # Fluent API
//!
//! Use the `MeshApply` extension trait for method chaining:
//! ```
//! use procgen::mesh::*;
//!
//! let mut mesh = generate_icosphere(&IcosphereParams::default());
//! mesh.apply(Transform::scale_uniform(3.0))
//!     .apply(SmoothNormals::default());
//! ```

use glam::{Mat3, Mat4, Vec3};
use hashbrown::HashMap;

use super::MeshData;

/// Trait for mesh modifiers
///
/// Implement this trait to create custom mesh modifiers that can be applied
/// to [`MeshData`] instances.
pub trait MeshModifier {
    /// Apply this modifier to a mesh, modifying it in place
    fn apply(&self, mesh: &mut MeshData);
}

/// Extension trait for fluent modifier application
pub trait MeshApply {
    /// Apply a modifier and return `&mut Self` for chaining
    fn apply<M: MeshModifier>(&mut self, modifier: M) -> &mut Self;
}

impl MeshApply for MeshData {
    fn apply<M: MeshModifier>(&mut self, modifier: M) -> &mut Self {
        modifier.apply(self);
        self
    }
}

/// Affine placement of a mesh
///
/// Normals go through the inverse-transpose of the linear part. A mirroring
/// matrix (negative determinant) also reverses triangle winding so faces
/// keep pointing outward. Singular matrices collapse positions but leave
/// normals untouched.
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// Uniform scale about the origin
    pub fn scale_uniform(s: f32) -> Self {
        Self::from_matrix(Mat4::from_scale(Vec3::splat(s)))
    }
}

impl MeshModifier for Transform {
    fn apply(&self, mesh: &mut MeshData) {
        let linear = Mat3::from_mat4(self.matrix);
        let det = linear.determinant();
        let normal_matrix = det.is_normal().then(|| linear.inverse().transpose());

        for v in &mut mesh.vertices {
            v.position = self.matrix.transform_point3(v.position()).to_array();
            if let Some(m) = normal_matrix {
                v.normal = (m * v.normal()).normalize_or_zero().to_array();
            }
        }

        if det < 0.0 {
            for tri in mesh.indices.chunks_exact_mut(3) {
                tri.swap(1, 2);
            }
        }
    }
}

/// Positions closer than `1 / WELD_SCALE` land in the same weld bucket
const WELD_SCALE: f32 = 10_000.0;

fn weld_key(p: Vec3) -> [i32; 3] {
    (p * WELD_SCALE).round().as_ivec3().to_array()
}

/// Recompute vertex normals by accumulating face normals
///
/// With `weld` set, vertices sharing a position share one normal, which
/// smooths across seams between independently indexed faces. Vertices with
/// no usable contribution keep their previous normal.
pub struct SmoothNormals {
    pub weld: bool,
}

impl Default for SmoothNormals {
    fn default() -> Self {
        Self { weld: true }
    }
}

impl MeshModifier for SmoothNormals {
    fn apply(&self, mesh: &mut MeshData) {
        let mut accum = vec![Vec3::ZERO; mesh.vertices.len()];

        for [a, b, c] in mesh.triangles() {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            if a >= accum.len() || b >= accum.len() || c >= accum.len() {
                continue;
            }
            let p0 = mesh.vertices[a].position();
            let p1 = mesh.vertices[b].position();
            let p2 = mesh.vertices[c].position();
            let face = (p1 - p0).cross(p2 - p0).normalize_or_zero();
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }

        if self.weld {
            let mut groups: HashMap<[i32; 3], Vec3> = HashMap::new();
            for (v, n) in mesh.vertices.iter().zip(&accum) {
                *groups.entry(weld_key(v.position())).or_insert(Vec3::ZERO) += *n;
            }
            for (v, n) in mesh.vertices.iter().zip(accum.iter_mut()) {
                if let Some(&sum) = groups.get(&weld_key(v.position())) {
                    *n = sum;
                }
            }
        }

        for (v, n) in mesh.vertices.iter_mut().zip(accum) {
            if let Some(n) = n.try_normalize() {
                v.normal = n.to_array();
            }
        }
    }
}
