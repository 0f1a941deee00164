//! Texture modifiers for compositing and post-processing
//!
//! Trait-based passes over a whole [`TextureData`], mirroring the mesh
//! modifier pattern in [`crate::mesh`].

use tracing::warn;

use super::{BlendMode, Color, PostProcess, TextureData};

/// Trait for texture modifiers
pub trait TextureModifier {
    /// Apply the modification to the texture buffer
    fn apply(&self, buffer: &mut TextureData);
}

/// Extension trait for fluent modifier application
pub trait TextureApply {
    /// Apply a modifier and return self for chaining
    fn apply<M: TextureModifier>(&mut self, modifier: M) -> &mut Self;
}

impl TextureApply for TextureData {
    fn apply<M: TextureModifier>(&mut self, modifier: M) -> &mut Self {
        modifier.apply(self);
        self
    }
}

#[inline]
fn to_unit(v: u8) -> f32 {
    v as f32 / 255.0
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Run `f` over the RGB channels of every pixel, alpha untouched
fn map_rgb(buffer: &mut TextureData, f: impl Fn(f32) -> f32) {
    for pixel in buffer.pixels_mut() {
        pixel.r = to_byte(f(to_unit(pixel.r)));
        pixel.g = to_byte(f(to_unit(pixel.g)));
        pixel.b = to_byte(f(to_unit(pixel.b)));
    }
}

/// Blend another texture onto the target
///
/// Only the overlapping region is touched.
pub struct Blend<'a> {
    /// Source texture to blend
    pub source: &'a TextureData,
    pub mode: BlendMode,
    /// Opacity (0.0 = invisible, 1.0 = fully opaque)
    pub opacity: f32,
}

impl TextureModifier for Blend<'_> {
    fn apply(&self, buffer: &mut TextureData) {
        for y in 0..buffer.height().min(self.source.height()) {
            for x in 0..buffer.width().min(self.source.width()) {
                let base = buffer.get_pixel(x, y);
                let blend = self.source.get_pixel(x, y);
                buffer.set_pixel(x, y, blend_pixels(base, blend, self.mode, self.opacity));
            }
        }
    }
}

/// Blend one pixel over another
///
/// The mode is evaluated per RGB channel in [0, 1], then the result is
/// lerped from `base` by `opacity`. Alpha keeps the larger of the two.
pub fn blend_pixels(base: Color, blend: Color, mode: BlendMode, opacity: f32) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);

    let channel = |b: u8, s: u8| -> u8 {
        let (b, s) = (to_unit(b), to_unit(s));
        let r = match mode {
            BlendMode::Replace => s,
            BlendMode::Add => (b + s).min(1.0),
            BlendMode::Multiply => b * s,
            BlendMode::Screen => 1.0 - (1.0 - b) * (1.0 - s),
            BlendMode::Overlay => {
                if b < 0.5 {
                    2.0 * b * s
                } else {
                    1.0 - 2.0 * (1.0 - b) * (1.0 - s)
                }
            }
            BlendMode::Darken => b.min(s),
            BlendMode::Lighten => b.max(s),
        };
        to_byte(b + (r - b) * opacity)
    };

    Color {
        r: channel(base.r, blend.r),
        g: channel(base.g, blend.g),
        b: channel(base.b, blend.b),
        a: base.a.max(blend.a),
    }
}

/// Invert colors (RGB only, alpha unchanged)
pub struct Invert;

impl TextureModifier for Invert {
    fn apply(&self, buffer: &mut TextureData) {
        for pixel in buffer.pixels_mut() {
            pixel.r = 255 - pixel.r;
            pixel.g = 255 - pixel.g;
            pixel.b = 255 - pixel.b;
        }
    }
}

/// Add a constant to every color channel
pub struct Brightness {
    /// Offset in units of full range (-1.0 to 1.0)
    pub amount: f32,
}

impl TextureModifier for Brightness {
    fn apply(&self, buffer: &mut TextureData) {
        map_rgb(buffer, |v| v + self.amount);
    }
}

/// Adjust contrast of the texture
pub struct Contrast {
    /// Contrast factor (1.0 = no change, >1 = more contrast, <1 = less)
    pub factor: f32,
}

impl TextureModifier for Contrast {
    fn apply(&self, buffer: &mut TextureData) {
        map_rgb(buffer, |v| (v - 0.5) * self.factor + 0.5);
    }
}

/// Gamma curve: `out = in^(1/gamma)`
pub struct Gamma {
    /// Gamma (1.0 = no change, >1 brightens midtones)
    pub gamma: f32,
}

impl TextureModifier for Gamma {
    fn apply(&self, buffer: &mut TextureData) {
        if !(self.gamma > 0.0 && self.gamma.is_finite()) {
            warn!("Gamma: gamma must be positive (got {}), skipping", self.gamma);
            return;
        }
        let exponent = 1.0 / self.gamma;
        map_rgb(buffer, |v| v.powf(exponent));
    }
}

impl TextureModifier for PostProcess {
    /// Invert, brightness, contrast, gamma; neutral settings are skipped
    fn apply(&self, buffer: &mut TextureData) {
        if self.invert {
            buffer.apply(Invert);
        }
        if self.brightness != 0.0 {
            buffer.apply(Brightness {
                amount: self.brightness,
            });
        }
        if self.contrast != 1.0 {
            buffer.apply(Contrast {
                factor: self.contrast,
            });
        }
        if self.gamma != 1.0 {
            buffer.apply(Gamma { gamma: self.gamma });
        }
    }
}
