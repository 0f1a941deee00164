//! Low-poly aircraft
//!
//! Built in body space: +Z forward (nose), +Y up, wings along X. This is
//! the same frame the orbit orientation uses, so a generated aircraft can be
//! dropped straight onto an orbit sample.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::combine::combine;
use super::modifiers::{MeshApply, SmoothNormals, Transform};
use super::MeshData;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AircraftStyle {
    Fighter,
    Civilian,
    Transport,
    #[default]
    Simple,
}

/// Dimensions of one aircraft style at unit scale
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AircraftShape {
    pub fuselage_length: f32,
    pub fuselage_radius: f32,
    /// Fraction of the length that narrows toward the nose
    pub nose_taper: f32,
    /// Fraction of the length that narrows toward the tail
    pub tail_taper: f32,
    pub wing_span: f32,
    pub wing_chord: f32,
    /// Leading edge sweep in radians
    pub wing_sweep: f32,
    pub tail_height: f32,
    /// Cross sections along the fuselage (at least 2)
    pub rings: u32,
    /// Sides per cross section (at least 3)
    pub segments: u32,
}

impl AircraftStyle {
    pub fn shape(self) -> AircraftShape {
        match self {
            AircraftStyle::Fighter => AircraftShape {
                fuselage_length: 4.0,
                fuselage_radius: 0.3,
                nose_taper: 0.35,
                tail_taper: 0.15,
                wing_span: 3.0,
                wing_chord: 1.4,
                wing_sweep: 0.7,
                tail_height: 0.9,
                rings: 8,
                segments: 8,
            },
            AircraftStyle::Civilian => AircraftShape {
                fuselage_length: 3.0,
                fuselage_radius: 0.3,
                nose_taper: 0.2,
                tail_taper: 0.25,
                wing_span: 4.0,
                wing_chord: 0.6,
                wing_sweep: 0.05,
                tail_height: 0.7,
                rings: 6,
                segments: 8,
            },
            AircraftStyle::Transport => AircraftShape {
                fuselage_length: 6.0,
                fuselage_radius: 0.6,
                nose_taper: 0.15,
                tail_taper: 0.3,
                wing_span: 7.0,
                wing_chord: 1.0,
                wing_sweep: 0.3,
                tail_height: 1.6,
                rings: 8,
                segments: 12,
            },
            AircraftStyle::Simple => AircraftShape {
                fuselage_length: 3.0,
                fuselage_radius: 0.25,
                nose_taper: 0.3,
                tail_taper: 0.3,
                wing_span: 3.0,
                wing_chord: 0.8,
                wing_sweep: 0.0,
                tail_height: 0.6,
                rings: 4,
                segments: 6,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftParams {
    pub style: AircraftStyle,
    /// Uniform scale on every dimension
    pub scale: f32,
}

impl Default for AircraftParams {
    fn default() -> Self {
        Self {
            style: AircraftStyle::Simple,
            scale: 1.0,
        }
    }
}

/// Radius of the end cross sections relative to the full radius
const END_RADIUS: f32 = 0.15;

/// Fuselage radius at normalized length `t` (0 = tail, 1 = nose)
fn fuselage_profile(shape: &AircraftShape, t: f32) -> f32 {
    let nose = shape.nose_taper.max(1e-3);
    let tail = shape.tail_taper.max(1e-3);
    let taper = if t > 1.0 - nose {
        (1.0 - t) / nose
    } else if t < tail {
        t / tail
    } else {
        1.0
    };
    shape.fuselage_radius * (END_RADIUS + (1.0 - END_RADIUS) * taper.clamp(0.0, 1.0))
}

/// Tapered surface of revolution along Z with a cone cap at each end
fn fuselage(shape: &AircraftShape) -> MeshData {
    let rings = shape.rings.max(2);
    let segments = shape.segments.max(3);
    let half = shape.fuselage_length * 0.5;
    let row = segments + 1;

    let mut mesh = MeshData::new();
    for k in 0..=rings {
        let t = k as f32 / rings as f32;
        let z = -half + shape.fuselage_length * t;
        let r = fuselage_profile(shape, t);
        for j in 0..=segments {
            let theta = TAU * j as f32 / segments as f32;
            let (s, c) = theta.sin_cos();
            mesh.add_vertex(
                Vec3::new(r * c, r * s, z),
                Vec3::new(c, s, 0.0),
                Vec2::new(j as f32 / segments as f32, t),
            );
        }
    }

    for k in 0..rings {
        for j in 0..segments {
            let a = k * row + j;
            let b = a + 1;
            let c = a + row + 1;
            let d = a + row;
            mesh.add_triangle(a, b, c);
            mesh.add_triangle(a, c, d);
        }
    }

    let end_r = fuselage_profile(shape, 1.0);
    let nose = mesh.add_vertex(Vec3::new(0.0, 0.0, half + end_r), Vec3::Z, Vec2::new(0.5, 1.0));
    let tail = mesh.add_vertex(Vec3::new(0.0, 0.0, -half - end_r), Vec3::NEG_Z, Vec2::new(0.5, 0.0));
    let last = rings * row;
    for j in 0..segments {
        mesh.add_triangle(last + j, last + j + 1, nose);
        mesh.add_triangle(j + 1, j, tail);
    }

    mesh
}

/// Add a quad wound to face `normal`, plus its back side
fn add_two_sided_quad(mesh: &mut MeshData, corners: [Vec3; 4], normal: Vec3) {
    let uvs = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
    let winding = (corners[1] - corners[0]).cross(corners[2] - corners[0]);
    let order: [usize; 4] = if winding.dot(normal) >= 0.0 {
        [0, 1, 2, 3]
    } else {
        [0, 3, 2, 1]
    };

    for (side, n) in [(0, normal), (1, -normal)] {
        let base = mesh.vertex_count() as u32;
        for &i in &order {
            mesh.add_vertex(corners[i], n, uvs[i]);
        }
        if side == 0 {
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base, base + 2, base + 3);
        } else {
            mesh.add_triangle(base, base + 2, base + 1);
            mesh.add_triangle(base, base + 3, base + 2);
        }
    }
}

/// Left and right wing panels in the y = 0 plane
fn wings(shape: &AircraftShape) -> MeshData {
    let half_span = shape.wing_span * 0.5;
    let root_le = shape.wing_chord * 0.5;
    let root_te = root_le - shape.wing_chord;
    let tip_chord = shape.wing_chord * 0.5;
    let tip_le = root_le - half_span * shape.wing_sweep.tan();
    let tip_te = tip_le - tip_chord;

    let mut mesh = MeshData::new();
    for side in [1.0f32, -1.0] {
        let x = half_span * side;
        add_two_sided_quad(
            &mut mesh,
            [
                Vec3::new(0.0, 0.0, root_le),
                Vec3::new(x, 0.0, tip_le),
                Vec3::new(x, 0.0, tip_te),
                Vec3::new(0.0, 0.0, root_te),
            ],
            Vec3::Y,
        );
    }
    mesh
}

/// Vertical fin at the tail, in the x = 0 plane
fn tail_fin(shape: &AircraftShape) -> MeshData {
    let half = shape.fuselage_length * 0.5;
    let base_y = fuselage_profile(shape, 0.0);
    let root = shape.tail_height * 0.8;

    let back = Vec3::new(0.0, base_y, -half);
    let front = Vec3::new(0.0, base_y, -half + root);
    let top = Vec3::new(0.0, base_y + shape.tail_height, -half);

    let mut mesh = MeshData::new();
    for n in [Vec3::X, Vec3::NEG_X] {
        let winding = (front - back).cross(top - back);
        let (b, c) = if winding.dot(n) >= 0.0 { (front, top) } else { (top, front) };
        let i0 = mesh.add_vertex(back, n, Vec2::ZERO);
        let i1 = mesh.add_vertex(b, n, Vec2::X);
        let i2 = mesh.add_vertex(c, n, Vec2::Y);
        mesh.add_triangle(i0, i1, i2);
    }
    mesh
}

/// Generate an aircraft from a style preset
///
/// Fuselage, wings and tail fin are built separately, concatenated and
/// given smooth normals per part (surfaces are not welded across parts).
pub fn generate_aircraft(params: &AircraftParams) -> MeshData {
    let scale = if params.scale > 0.0 && params.scale.is_finite() {
        params.scale
    } else {
        warn!(
            "generate_aircraft: scale must be > 0.0 (got {}), clamping to 0.001",
            params.scale
        );
        0.001
    };

    // Parts are built at unit scale, then sized as a whole
    let shape = params.style.shape();
    let body = fuselage(&shape);
    let wing = wings(&shape);
    let fin = tail_fin(&shape);
    let mut mesh = combine(&[&body, &wing, &fin]);
    mesh.apply(Transform::scale_uniform(scale))
        .apply(SmoothNormals { weld: false });

    debug!(
        style = ?params.style,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "generated aircraft"
    );
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: [AircraftStyle; 4] = [
        AircraftStyle::Fighter,
        AircraftStyle::Civilian,
        AircraftStyle::Transport,
        AircraftStyle::Simple,
    ];

    fn aircraft(style: AircraftStyle, scale: f32) -> MeshData {
        generate_aircraft(&AircraftParams { style, scale })
    }

    #[test]
    fn test_every_style_is_valid() {
        for style in STYLES {
            let mesh = aircraft(style, 1.0);
            assert!(mesh.validate().is_ok(), "{:?}", style);
            assert!(mesh.triangle_count() > 0);
            for v in &mesh.vertices {
                assert!((v.normal().length() - 1.0).abs() < 1e-4, "{:?}", style);
            }
        }
    }

    #[test]
    fn test_extent_matches_shape() {
        for style in STYLES {
            let shape = style.shape();
            let (lo, hi) = aircraft(style, 1.0).bounds().unwrap();
            assert!((hi.x - shape.wing_span * 0.5).abs() < 1e-5);
            assert!((lo.x + shape.wing_span * 0.5).abs() < 1e-5);
            assert!(hi.z > shape.fuselage_length * 0.5);
            assert!(lo.z < -shape.fuselage_length * 0.5);
        }
    }

    #[test]
    fn test_scale_scales_bounds() {
        let (lo1, hi1) = aircraft(AircraftStyle::Fighter, 1.0).bounds().unwrap();
        let (lo2, hi2) = aircraft(AircraftStyle::Fighter, 2.0).bounds().unwrap();
        assert!((lo2 - lo1 * 2.0).length() < 1e-4);
        assert!((hi2 - hi1 * 2.0).length() < 1e-4);
    }

    #[test]
    fn test_wing_top_faces_up() {
        let mesh = aircraft(AircraftStyle::Civilian, 1.0);
        let up_faces = mesh
            .triangles()
            .filter(|[a, b, c]| {
                let p0 = mesh.vertices[*a as usize].position();
                let p1 = mesh.vertices[*b as usize].position();
                let p2 = mesh.vertices[*c as usize].position();
                let n = (p1 - p0).cross(p2 - p0).normalize_or_zero();
                p0.y == 0.0 && p1.y == 0.0 && p2.y == 0.0 && n.y > 0.99
            })
            .count();
        // Two panels, two triangles each
        assert_eq!(up_faces, 4);
    }

    #[test]
    fn test_fuselage_faces_outward() {
        let shape = AircraftStyle::Transport.shape();
        let mesh = fuselage(&shape);
        for [a, b, c] in mesh.triangles() {
            let p0 = mesh.vertices[a as usize].position();
            let p1 = mesh.vertices[b as usize].position();
            let p2 = mesh.vertices[c as usize].position();
            let face = (p1 - p0).cross(p2 - p0);
            let centroid = (p0 + p1 + p2) / 3.0;
            assert!(face.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_styles_differ() {
        let fighter = aircraft(AircraftStyle::Fighter, 1.0);
        let transport = aircraft(AircraftStyle::Transport, 1.0);
        assert_ne!(fighter.vertex_count(), transport.vertex_count());
    }

    #[test]
    fn test_invalid_scale_clamped() {
        let mesh = aircraft(AircraftStyle::Simple, 0.0);
        assert!(mesh.validate().is_ok());
        let (lo, hi) = mesh.bounds().unwrap();
        assert!((hi - lo).length() < 0.01);
    }
}
