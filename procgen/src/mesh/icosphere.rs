//! Subdivided icosahedron spheres
//!
//! The 12-vertex icosahedron is subdivided by splitting every triangle into
//! four, with edge midpoints shared through a [`MidpointCache`] so that
//! neighbouring triangles reuse the same vertex. Positions are pushed back
//! onto the sphere after every pass.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::MeshData;

/// Levels above this are accepted but warned about (10·4⁶+2 = 40962 vertices)
pub const RECOMMENDED_MAX_SUBDIVISIONS: u32 = 6;

/// Highest level whose vertex count still fits `u32` indices
pub const MAX_SUBDIVISIONS: u32 = 14;

/// Smallest accepted radius
pub const MIN_RADIUS: f32 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IcosphereParams {
    pub radius: f32,
    /// Each level multiplies vertex and triangle counts by 4. Levels above
    /// [`RECOMMENDED_MAX_SUBDIVISIONS`] are accepted with a warning; levels
    /// above [`MAX_SUBDIVISIONS`] cannot be indexed with `u32` and clamp.
    pub subdivisions: u32,
    /// Duplicate vertices along the texture seam so UVs do not wrap backwards
    pub fix_seam: bool,
}

impl Default for IcosphereParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            subdivisions: 2,
            fix_seam: true,
        }
    }
}

/// Edge midpoint lookup keyed by the sorted endpoint pair
#[derive(Clone, Debug, Default)]
pub struct MidpointCache {
    midpoints: HashMap<(u32, u32), u32>,
}

impl MidpointCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.midpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.midpoints.is_empty()
    }

    pub fn clear(&mut self) {
        self.midpoints.clear();
    }

    /// Index of the midpoint of edge (a, b), appending it on first use
    pub fn midpoint(&mut self, positions: &mut Vec<Vec3>, a: u32, b: u32) -> u32 {
        let key = (a.min(b), a.max(b));
        *self.midpoints.entry(key).or_insert_with(|| {
            let mid = (positions[a as usize] + positions[b as usize]) * 0.5;
            positions.push(mid);
            (positions.len() - 1) as u32
        })
    }
}

/// Split every triangle into four
///
/// Midpoints are appended to `positions` (not re-projected) and the new
/// index list is returned. Edges already present in `cache` reuse their
/// midpoint.
pub fn subdivide(positions: &mut Vec<Vec3>, indices: &[u32], cache: &mut MidpointCache) -> Vec<u32> {
    let mut out = Vec::with_capacity(indices.len() * 4);
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let ab = cache.midpoint(positions, a, b);
        let bc = cache.midpoint(positions, b, c);
        let ca = cache.midpoint(positions, c, a);
        out.extend_from_slice(&[a, ab, ca, b, bc, ab, c, ca, bc, ab, bc, ca]);
    }
    out
}

/// Unit icosahedron, counter-clockwise from outside
fn icosahedron() -> (Vec<Vec3>, Vec<u32>) {
    let t = (1.0 + 5.0f32.sqrt()) * 0.5;
    let positions = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
    .into_iter()
    .map(|p| Vec3::from_array(p).normalize())
    .collect();

    #[rustfmt::skip]
    let indices = vec![
        0, 11, 5,   0, 5, 1,    0, 1, 7,    0, 7, 10,   0, 10, 11,
        1, 5, 9,    5, 11, 4,   11, 10, 2,  10, 7, 6,   7, 1, 8,
        3, 9, 4,    3, 4, 2,    3, 2, 6,    3, 6, 8,    3, 8, 9,
        4, 9, 5,    2, 4, 11,   6, 2, 10,   8, 6, 7,    9, 8, 1,
    ];

    (positions, indices)
}

/// Equirectangular UV for a unit direction
#[inline]
pub fn sphere_uv(dir: Vec3) -> Vec2 {
    Vec2::new(
        dir.z.atan2(dir.x) / TAU + 0.5,
        0.5 - dir.y.clamp(-1.0, 1.0).asin() / PI,
    )
}

/// Duplicate low-U vertices of triangles that straddle the U wrap
///
/// Each source vertex is duplicated at most once; the copy gets U + 1.
fn fix_uv_seam(mesh: &mut MeshData) {
    let mut duplicates: HashMap<u32, u32> = HashMap::new();

    for t in 0..mesh.triangle_count() {
        let tri = [
            mesh.indices[t * 3],
            mesh.indices[t * 3 + 1],
            mesh.indices[t * 3 + 2],
        ];
        let us = tri.map(|i| mesh.vertices[i as usize].uv[0]);
        let span = us.iter().copied().fold(f32::MIN, f32::max) - us.iter().copied().fold(f32::MAX, f32::min);
        if span <= 0.5 {
            continue;
        }

        for (k, &i) in tri.iter().enumerate() {
            if us[k] >= 0.5 {
                continue;
            }
            let copy = *duplicates.entry(i).or_insert_with(|| {
                let mut v = mesh.vertices[i as usize];
                v.uv[0] += 1.0;
                mesh.vertices.push(v);
                (mesh.vertices.len() - 1) as u32
            });
            mesh.indices[t * 3 + k] = copy;
        }
    }
}

/// Generate an icosphere
///
/// Before seam repair the sphere has 10·4ⁿ+2 vertices and 20·4ⁿ triangles
/// for `n` subdivisions. Every vertex sits at exactly `radius` with its
/// normal pointing away from the origin.
pub fn generate_icosphere(params: &IcosphereParams) -> MeshData {
    let radius = if params.radius > 0.0 && params.radius.is_finite() {
        params.radius
    } else {
        warn!(
            "generate_icosphere: radius must be positive (got {}), clamping to {}",
            params.radius, MIN_RADIUS
        );
        MIN_RADIUS
    };

    let mut levels = params.subdivisions;
    if levels > MAX_SUBDIVISIONS {
        warn!(
            "generate_icosphere: {} subdivisions overflows u32 indices, clamping to {}",
            levels, MAX_SUBDIVISIONS
        );
        levels = MAX_SUBDIVISIONS;
    } else if levels > RECOMMENDED_MAX_SUBDIVISIONS {
        warn!(
            "generate_icosphere: {} subdivisions produces {} vertices",
            levels,
            10 * 4u64.pow(levels) + 2
        );
    }

    let (mut positions, mut indices) = icosahedron();
    let mut cache = MidpointCache::new();
    for _ in 0..levels {
        cache.clear();
        indices = subdivide(&mut positions, &indices, &mut cache);
        for p in &mut positions {
            *p = p.normalize();
        }
    }

    let mut mesh = MeshData::with_capacity(positions.len(), indices.len());
    for dir in positions {
        mesh.add_vertex(dir * radius, dir, sphere_uv(dir));
    }
    mesh.indices = indices;

    if params.fix_seam {
        fix_uv_seam(&mut mesh);
    }

    debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "generated icosphere"
    );
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn welded(radius: f32, subdivisions: u32) -> MeshData {
        generate_icosphere(&IcosphereParams {
            radius,
            subdivisions,
            fix_seam: false,
        })
    }

    #[test]
    fn test_vertex_and_triangle_counts() {
        for n in 0..=4u32 {
            let mesh = welded(1.0, n);
            assert_eq!(mesh.vertex_count(), 10 * 4usize.pow(n) + 2, "level {}", n);
            assert_eq!(mesh.triangle_count(), 20 * 4usize.pow(n), "level {}", n);
        }
    }

    #[test]
    fn test_all_vertices_on_radius() {
        let mesh = generate_icosphere(&IcosphereParams {
            radius: 2.5,
            subdivisions: 3,
            fix_seam: true,
        });
        for v in &mesh.vertices {
            assert!((v.position().length() - 2.5).abs() < 1e-4);
            assert!((v.normal().length() - 1.0).abs() < 1e-5);
            assert!((v.position() / 2.5 - v.normal()).length() < 1e-5);
        }
    }

    #[test]
    fn test_triangles_face_outward() {
        let mesh = welded(1.0, 2);
        for [a, b, c] in mesh.triangles() {
            let p0 = mesh.vertices[a as usize].position();
            let p1 = mesh.vertices[b as usize].position();
            let p2 = mesh.vertices[c as usize].position();
            assert!((p1 - p0).cross(p2 - p0).dot(p0 + p1 + p2) > 0.0);
        }
    }

    #[test]
    fn test_shared_edge_gets_one_midpoint() {
        // Two triangles sharing edge (1, 2)
        let mut positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE];
        let mut cache = MidpointCache::new();
        let out = subdivide(&mut positions, &[0, 1, 2, 2, 1, 3], &mut cache);

        assert_eq!(out.len(), 24);
        // 4 original + 5 unique edges
        assert_eq!(positions.len(), 9);
        assert_eq!(cache.len(), 5);

        let m12 = cache.midpoint(&mut positions, 2, 1);
        assert_eq!(positions.len(), 9);
        assert_eq!(positions[m12 as usize], Vec3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn test_seam_repair_duplicates_with_shifted_u() {
        let plain = welded(1.0, 3);
        let fixed = generate_icosphere(&IcosphereParams {
            subdivisions: 3,
            ..Default::default()
        });
        assert!(fixed.vertex_count() > plain.vertex_count());
        assert_eq!(fixed.triangle_count(), plain.triangle_count());
        assert!(fixed.validate().is_ok());
        for v in &fixed.vertices[plain.vertex_count()..] {
            assert!(v.uv[0] >= 1.0);
        }
    }

    #[test]
    fn test_seam_repair_leaves_only_pole_triangles_wide() {
        let mesh = generate_icosphere(&IcosphereParams {
            subdivisions: 3,
            ..Default::default()
        });
        for [a, b, c] in mesh.triangles() {
            let vs = [a, b, c].map(|i| mesh.vertices[i as usize]);
            let us = vs.map(|v| v.uv[0]);
            let span = us.iter().copied().fold(f32::MIN, f32::max)
                - us.iter().copied().fold(f32::MAX, f32::min);
            if span > 0.5 {
                assert!(vs.iter().any(|v| v.normal[1].abs() > 0.999));
            }
        }
    }

    #[test]
    fn test_levels_past_recommended_are_accepted() {
        let level = RECOMMENDED_MAX_SUBDIVISIONS + 1;
        let mesh = welded(1.0, level);
        assert_eq!(mesh.vertex_count() as u64, 10 * 4u64.pow(level) + 2);
        assert_eq!(mesh.triangle_count() as u64, 20 * 4u64.pow(level));
    }

    #[test]
    fn test_subdivision_ceiling_is_index_width() {
        let vertices = |n: u32| 10 * 4u64.pow(n) + 2;
        assert!(vertices(MAX_SUBDIVISIONS) <= u32::MAX as u64);
        assert!(vertices(MAX_SUBDIVISIONS + 1) > u32::MAX as u64);
    }

    #[test]
    fn test_non_positive_radius_is_clamped() {
        let mesh = welded(-1.0, 1);
        for v in &mesh.vertices {
            assert!((v.position().length() - MIN_RADIUS).abs() < 1e-6);
        }
    }

    #[test]
    fn test_uv_range() {
        let mesh = welded(1.0, 2);
        for v in &mesh.vertices {
            assert!((0.0..=1.0).contains(&v.uv[0]));
            assert!((0.0..=1.0).contains(&v.uv[1]));
        }
    }
}
