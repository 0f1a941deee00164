//! Texture description types
//!
//! Every struct carries `#[serde(default)]` so partial descriptions fill in
//! from [`Default`].

use serde::{Deserialize, Serialize};

use super::Color;
use crate::noise::NoiseField;

/// Top-level texture request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureParams {
    pub width: u32,
    pub height: u32,
    /// 3 (RGB) or 4 (RGBA)
    pub channels: u32,
    pub kind: TextureKind,
    pub post: PostProcess,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            channels: 4,
            kind: TextureKind::default(),
            post: PostProcess::default(),
        }
    }
}

/// What to synthesize
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TextureKind {
    Noise(NoiseParams),
    Gradient(GradientParams),
    Pattern(PatternParams),
    Composite(CompositeParams),
}

impl Default for TextureKind {
    fn default() -> Self {
        Self::Noise(NoiseParams::default())
    }
}

/// Position on a color ramp
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Ramp position, normally 0.0 to 1.0
    pub position: f32,
    pub color: Color,
}

impl ColorStop {
    pub const fn new(position: f32, color: Color) -> Self {
        Self { position, color }
    }
}

fn black_to_white() -> Vec<ColorStop> {
    vec![
        ColorStop::new(0.0, Color::BLACK),
        ColorStop::new(1.0, Color::WHITE),
    ]
}

/// Noise texture: a scalar field mapped through a color ramp
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    pub field: NoiseField,
    /// Multiplier on the raw field value before remapping
    pub amplitude: f32,
    /// Wrap the ramp position instead of clamping it
    pub repeat: bool,
    pub colors: Vec<ColorStop>,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            field: NoiseField::default(),
            amplitude: 1.0,
            repeat: false,
            colors: black_to_white(),
        }
    }
}

/// Gradient shape
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradientKind {
    /// Along the x axis, rotated by `angle`
    #[default]
    Linear,
    /// Euclidean distance from `center`
    Radial,
    /// Angle around `center`
    Angular,
    /// Manhattan distance from `center`
    Diamond,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientParams {
    pub kind: GradientKind,
    pub stops: Vec<ColorStop>,
    /// Origin for radial, angular and diamond gradients (normalized coordinates)
    pub center: [f32; 2],
    /// Rotation in radians (linear direction, angular start)
    pub angle: f32,
    /// Number of ramp traversals across the texture
    pub scale: f32,
    pub repeat: bool,
}

impl Default for GradientParams {
    fn default() -> Self {
        Self {
            kind: GradientKind::Linear,
            stops: black_to_white(),
            center: [0.5, 0.5],
            angle: 0.0,
            scale: 1.0,
            repeat: false,
        }
    }
}

/// Two-color closed-form pattern
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternKind {
    #[default]
    Checkerboard,
    Stripes,
    Dots,
    Grid,
    Spiral,
    Wave,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternParams {
    pub kind: PatternKind,
    pub color_a: Color,
    pub color_b: Color,
    /// Repetitions across the texture
    pub scale: f32,
    /// Fraction of each repetition covered by `color_a` (stripes, dots, grid lines, spiral arms, waves)
    pub thickness: f32,
    /// Rotation in radians about the texture centre
    pub angle: f32,
}

impl Default for PatternParams {
    fn default() -> Self {
        Self {
            kind: PatternKind::Checkerboard,
            color_a: Color::WHITE,
            color_b: Color::BLACK,
            scale: 8.0,
            thickness: 0.5,
            angle: 0.0,
        }
    }
}

/// Per-channel blend operation for compositing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendMode {
    #[default]
    Replace,
    Add,
    Multiply,
    Overlay,
    Screen,
    Darken,
    Lighten,
}

/// Layered texture
///
/// `layers`, `blend_modes` and `opacities` are parallel: entry `i` of the
/// latter two applies to layer `i`. Missing entries default to
/// [`BlendMode::Replace`] and full opacity. Layer 0 is the base and its
/// blend mode and opacity are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeParams {
    pub layers: Vec<TextureParams>,
    pub blend_modes: Vec<BlendMode>,
    pub opacities: Vec<f32>,
}

impl CompositeParams {
    /// Blend mode for layer `index`
    pub fn blend_mode(&self, index: usize) -> BlendMode {
        self.blend_modes.get(index).copied().unwrap_or_default()
    }

    /// Opacity for layer `index`, clamped to [0, 1]
    pub fn opacity(&self, index: usize) -> f32 {
        self.opacities
            .get(index)
            .copied()
            .unwrap_or(1.0)
            .clamp(0.0, 1.0)
    }
}

/// Whole-buffer adjustments applied after synthesis
///
/// Passes run in field order. Neutral values skip their pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostProcess {
    pub invert: bool,
    /// Added to every color channel, in units of full range (-1.0 to 1.0)
    pub brightness: f32,
    /// Scale about mid-gray (1.0 = unchanged)
    pub contrast: f32,
    /// Gamma exponent (1.0 = unchanged)
    pub gamma: f32,
}

impl Default for PostProcess {
    fn default() -> Self {
        Self {
            invert: false,
            brightness: 0.0,
            contrast: 1.0,
            gamma: 1.0,
        }
    }
}

impl PostProcess {
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}
