//! Procedural texture generation
//!
//! Textures are described by a [`TextureParams`] value (noise, gradient,
//! pattern or a composite of those) and synthesized into a [`TextureData`]
//! pixel buffer with [`generate_texture`].
//!
//! # Example
//! ```
//! use procgen::texture::*;
//!
//! let params = TextureParams {
//!     width: 64,
//!     height: 64,
//!     kind: TextureKind::Pattern(PatternParams {
//!         kind: PatternKind::Checkerboard,
//!         scale: 8.0,
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//!
//! let mut tex = generate_texture(&params);
//! tex.apply(Contrast { factor: 1.2 }).apply(Invert);
//! assert_eq!(tex.len(), 64 * 64);
//! ```

mod gradient;
mod modifiers;
mod params;
mod patterns;
mod synth;

// Core types
pub use self::buffer::{Color, TextureData};

// Parameter structs
pub use params::{
    BlendMode, ColorStop, CompositeParams, GradientKind, GradientParams, NoiseParams,
    PatternKind, PatternParams, PostProcess, TextureKind, TextureParams,
};

// Evaluators
pub use gradient::{ColorRamp, gradient_position};
pub use patterns::pattern_selects_a;

// Modifiers
pub use modifiers::{
    Blend, Brightness, Contrast, Gamma, Invert, TextureApply, TextureModifier, blend_pixels,
};

// Synthesis
pub use synth::generate_texture;

mod buffer {
    use bytemuck::{Pod, Zeroable};
    use serde::{Deserialize, Serialize};
    use tracing::warn;

    use crate::error::TextureError;

    /// RGBA color, 8 bits per channel
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
    #[serde(from = "[u8; 4]", into = "[u8; 4]")]
    #[repr(C)]
    pub struct Color {
        pub r: u8,
        pub g: u8,
        pub b: u8,
        pub a: u8,
    }

    impl Color {
        pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
        pub const BLACK: Self = Self::rgb(0, 0, 0);
        pub const WHITE: Self = Self::rgb(255, 255, 255);
        /// Uniform gray returned when a description cannot be rendered
        pub const FALLBACK: Self = Self::rgb(128, 128, 128);

        pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
            Self { r, g, b, a }
        }

        pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
            Self::rgba(r, g, b, 255)
        }

        /// Linear interpolation between two colors (all four channels)
        pub fn lerp(self, other: Self, t: f32) -> Self {
            let t = t.clamp(0.0, 1.0);
            Self {
                r: lerp_u8(self.r, other.r, t),
                g: lerp_u8(self.g, other.g, t),
                b: lerp_u8(self.b, other.b, t),
                a: lerp_u8(self.a, other.a, t),
            }
        }

        pub fn to_array(self) -> [u8; 4] {
            [self.r, self.g, self.b, self.a]
        }
    }

    impl From<[u8; 4]> for Color {
        fn from(c: [u8; 4]) -> Self {
            Self::rgba(c[0], c[1], c[2], c[3])
        }
    }

    impl From<Color> for [u8; 4] {
        fn from(c: Color) -> Self {
            c.to_array()
        }
    }

    /// Linear interpolation for u8 values
    #[inline]
    pub(crate) fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
        (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
    }

    /// Row-major pixel buffer
    ///
    /// The pixel vector always holds exactly `width * height` colors.
    /// `channels` (3 or 4) only affects [`to_bytes`](Self::to_bytes); pixels
    /// are stored as RGBA either way.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct TextureData {
        width: u32,
        height: u32,
        channels: u32,
        pixels: Vec<Color>,
    }

    fn checked_channels(channels: u32) -> u32 {
        match channels {
            3 | 4 => channels,
            other => {
                warn!("TextureData: channels must be 3 or 4 (got {}), using 4", other);
                4
            }
        }
    }

    impl TextureData {
        /// Create a buffer initialized to transparent black
        pub fn new(width: u32, height: u32, channels: u32) -> Self {
            Self::filled(width, height, channels, Color::TRANSPARENT)
        }

        /// Create a buffer filled with a solid color
        pub fn filled(width: u32, height: u32, channels: u32, color: Color) -> Self {
            Self {
                width,
                height,
                channels: checked_channels(channels),
                pixels: vec![color; width as usize * height as usize],
            }
        }

        /// Import interleaved bytes (3 or 4 per pixel, row-major)
        ///
        /// Three-channel data gets an opaque alpha.
        pub fn from_bytes(
            width: u32,
            height: u32,
            channels: u32,
            bytes: &[u8],
        ) -> Result<Self, TextureError> {
            if channels != 3 && channels != 4 {
                return Err(TextureError::UnsupportedChannels(channels));
            }
            let expected = width as usize * height as usize * channels as usize;
            if bytes.len() != expected {
                return Err(TextureError::SizeMismatch {
                    width,
                    height,
                    channels,
                    expected,
                    actual: bytes.len(),
                });
            }

            let pixels = bytes
                .chunks_exact(channels as usize)
                .map(|c| {
                    if channels == 4 {
                        Color::rgba(c[0], c[1], c[2], c[3])
                    } else {
                        Color::rgb(c[0], c[1], c[2])
                    }
                })
                .collect();

            Ok(Self {
                width,
                height,
                channels,
                pixels,
            })
        }

        pub fn width(&self) -> u32 {
            self.width
        }

        pub fn height(&self) -> u32 {
            self.height
        }

        pub fn channels(&self) -> u32 {
            self.channels
        }

        /// Number of pixels
        pub fn len(&self) -> usize {
            self.pixels.len()
        }

        pub fn is_empty(&self) -> bool {
            self.pixels.is_empty()
        }

        pub fn pixels(&self) -> &[Color] {
            &self.pixels
        }

        pub fn pixels_mut(&mut self) -> &mut [Color] {
            &mut self.pixels
        }

        #[inline]
        fn index(&self, x: u32, y: u32) -> Option<usize> {
            (x < self.width && y < self.height)
                .then(|| y as usize * self.width as usize + x as usize)
        }

        /// Get pixel at (x, y); transparent black when out of range
        #[inline]
        pub fn get_pixel(&self, x: u32, y: u32) -> Color {
            self.index(x, y)
                .map_or(Color::TRANSPARENT, |i| self.pixels[i])
        }

        /// Set pixel at (x, y); ignored when out of range
        #[inline]
        pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
            if let Some(i) = self.index(x, y) {
                self.pixels[i] = color;
            }
        }

        /// Fill every pixel with one color
        pub fn fill(&mut self, color: Color) {
            self.pixels.fill(color);
        }

        /// Change dimensions; prior content is discarded
        pub fn resize(&mut self, width: u32, height: u32) {
            self.width = width;
            self.height = height;
            self.pixels = vec![Color::TRANSPARENT; width as usize * height as usize];
        }

        /// Zero-copy RGBA byte view (4 bytes per pixel regardless of `channels`)
        pub fn as_rgba_bytes(&self) -> &[u8] {
            bytemuck::cast_slice(&self.pixels)
        }

        /// Interleaved bytes honouring the channel count
        pub fn to_bytes(&self) -> Vec<u8> {
            if self.channels == 4 {
                return self.as_rgba_bytes().to_vec();
            }
            let mut out = Vec::with_capacity(self.pixels.len() * 3);
            for p in &self.pixels {
                out.extend_from_slice(&[p.r, p.g, p.b]);
            }
            out
        }
    }
}
