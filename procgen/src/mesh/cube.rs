//! Cube with optional corner rounding

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::modifiers::{MeshModifier, SmoothNormals};
use super::MeshData;

/// How cube faces are laid out in UV space
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CubeUvMode {
    /// Every face spans the full [0, 1] square
    #[default]
    PerFace,
    /// Faces packed into a 3x2 grid (+X, -X, +Y on the top row)
    Atlas,
    /// Top-down projection of X/Z across the cube's footprint
    Projected,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeParams {
    pub half_extent: f32,
    /// 0 gives sharp corners, `half_extent` gives a sphere
    pub corner_radius: f32,
    /// Quads per face edge; 1 gives a plain 24-vertex box, rounding needs more
    pub segments: u32,
    pub uv_mode: CubeUvMode,
}

impl Default for CubeParams {
    fn default() -> Self {
        Self {
            half_extent: 1.0,
            corner_radius: 0.0,
            segments: 1,
            uv_mode: CubeUvMode::PerFace,
        }
    }
}

/// (normal, u axis, v axis) per face, with u × v = normal
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
];

/// Pull `p` toward the sphere of `radius` by `factor`
#[inline]
fn round_corner(p: Vec3, radius: f32, factor: f32) -> Vec3 {
    let len = p.length();
    if len <= radius {
        return p;
    }
    p.lerp(p / len * radius, factor)
}

fn face_uv(mode: CubeUvMode, face: usize, local: Vec2, position: Vec3, half_extent: f32) -> Vec2 {
    match mode {
        CubeUvMode::PerFace => local,
        CubeUvMode::Atlas => {
            let col = (face % 3) as f32;
            let row = (face / 3) as f32;
            Vec2::new((col + local.x) / 3.0, (row + local.y) / 2.0)
        }
        CubeUvMode::Projected => Vec2::new(
            position.x / (2.0 * half_extent) + 0.5,
            position.z / (2.0 * half_extent) + 0.5,
        ),
    }
}

/// Generate a cube of six independently indexed `segments × segments` grids
///
/// With a positive `corner_radius`, vertices farther than the radius from
/// the centre are lerped toward the radius sphere by `radius / half_extent`
/// and normals are rebuilt with position welding.
pub fn generate_cube(params: &CubeParams) -> MeshData {
    let h = if params.half_extent > 0.0 && params.half_extent.is_finite() {
        params.half_extent
    } else {
        warn!(
            "generate_cube: half_extent must be > 0.0 (got {}), clamping to 0.001",
            params.half_extent
        );
        0.001
    };

    let r = if params.corner_radius.is_nan() {
        0.0
    } else {
        params.corner_radius
    };
    let r = if !(0.0..=h).contains(&r) {
        let clamped = r.clamp(0.0, h);
        warn!(
            "generate_cube: corner_radius {} outside [0, {}], clamping to {}",
            r, h, clamped
        );
        clamped
    } else {
        r
    };

    let n = if params.segments == 0 {
        warn!("generate_cube: segments must be >= 1, clamping to 1");
        1
    } else {
        params.segments
    };

    let row = n + 1;
    let mut mesh = MeshData::with_capacity(
        6 * (row * row) as usize,
        6 * (n * n * 6) as usize,
    );

    let factor = r / h;
    for (face, &(normal, u_axis, v_axis)) in FACES.iter().enumerate() {
        let base = mesh.vertex_count() as u32;

        for j in 0..=n {
            for i in 0..=n {
                let s = i as f32 / n as f32;
                let t = j as f32 / n as f32;
                let flat = (normal + u_axis * (2.0 * s - 1.0) + v_axis * (2.0 * t - 1.0)) * h;
                let position = if r > 0.0 {
                    round_corner(flat, r, factor)
                } else {
                    flat
                };
                let local = Vec2::new(s, 1.0 - t);
                let uv = face_uv(params.uv_mode, face, local, position, h);
                mesh.add_vertex(position, normal, uv);
            }
        }

        for j in 0..n {
            for i in 0..n {
                let i0 = base + j * row + i;
                let i1 = i0 + 1;
                let i2 = i0 + row + 1;
                let i3 = i0 + row;
                mesh.add_triangle(i0, i1, i2);
                mesh.add_triangle(i0, i2, i3);
            }
        }
    }

    if r > 0.0 {
        SmoothNormals { weld: true }.apply(&mut mesh);
    }

    debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "generated cube"
    );
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(half_extent: f32, corner_radius: f32) -> MeshData {
        generate_cube(&CubeParams {
            half_extent,
            corner_radius,
            segments: 4,
            ..Default::default()
        })
    }

    #[test]
    fn test_default_is_plain_box() {
        let mesh = generate_cube(&CubeParams::default());
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        for v in &mesh.vertices {
            assert!(v.position().abs().cmpeq(Vec3::ONE).all());
        }
    }

    #[test]
    fn test_counts() {
        let mesh = generate_cube(&CubeParams {
            segments: 3,
            ..Default::default()
        });
        assert_eq!(mesh.vertex_count(), 6 * 16);
        assert_eq!(mesh.triangle_count(), 6 * 9 * 2);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_sharp_corners_at_sqrt3() {
        let mesh = cube(1.0, 0.0);
        let max = mesh
            .vertices
            .iter()
            .map(|v| v.position().length())
            .fold(0.0f32, f32::max);
        assert!((max - 3.0f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_full_radius_is_sphere() {
        let mesh = cube(1.0, 1.0);
        for v in &mesh.vertices {
            assert!((v.position().length() - 1.0).abs() < 1e-5);
            assert!((v.normal().length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_partial_rounding_stays_between() {
        let mesh = cube(2.0, 1.0);
        for v in &mesh.vertices {
            let len = v.position().length();
            assert!(len <= 2.0 * 3.0f32.sqrt() + 1e-4);
            assert!(len >= 1.0 - 1e-4);
        }
        let max = mesh
            .vertices
            .iter()
            .map(|v| v.position().length())
            .fold(0.0f32, f32::max);
        assert!(max < 2.0 * 3.0f32.sqrt() - 0.1);
    }

    #[test]
    fn test_faces_wind_outward() {
        let mesh = cube(1.0, 0.0);
        for [a, b, c] in mesh.triangles() {
            let p0 = mesh.vertices[a as usize].position();
            let p1 = mesh.vertices[b as usize].position();
            let p2 = mesh.vertices[c as usize].position();
            let face = (p1 - p0).cross(p2 - p0);
            assert!(face.dot(mesh.vertices[a as usize].normal()) > 0.0);
        }
    }

    #[test]
    fn test_oversized_radius_is_clamped() {
        let mesh = cube(1.0, 5.0);
        for v in &mesh.vertices {
            assert!((v.position().length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_atlas_uvs_in_cells() {
        let mesh = generate_cube(&CubeParams {
            segments: 2,
            uv_mode: CubeUvMode::Atlas,
            ..Default::default()
        });
        let per_face = 9;
        for (face, chunk) in mesh.vertices.chunks(per_face).enumerate() {
            let col = (face % 3) as f32 / 3.0;
            let row = (face / 3) as f32 / 2.0;
            for v in chunk {
                assert!(v.uv[0] >= col - 1e-6 && v.uv[0] <= col + 1.0 / 3.0 + 1e-6);
                assert!(v.uv[1] >= row - 1e-6 && v.uv[1] <= row + 0.5 + 1e-6);
            }
        }
    }

    #[test]
    fn test_projected_uvs_cover_unit_square() {
        let mesh = generate_cube(&CubeParams {
            uv_mode: CubeUvMode::Projected,
            ..Default::default()
        });
        for v in &mesh.vertices {
            assert!((0.0..=1.0).contains(&v.uv[0]));
            assert!((0.0..=1.0).contains(&v.uv[1]));
        }
    }

    #[test]
    fn test_zero_segments_clamped() {
        let mesh = generate_cube(&CubeParams {
            segments: 0,
            ..Default::default()
        });
        assert_eq!(mesh.triangle_count(), 12);
    }
}
