//! Texture synthesis entry point

use tracing::{debug, warn};

use super::gradient::shape_position;
use super::{
    Blend, Color, ColorRamp, CompositeParams, GradientParams, NoiseParams, PatternParams,
    PostProcess, TextureApply, TextureData, TextureKind, TextureParams, gradient_position,
    pattern_selects_a,
};

/// Synthesize a texture
///
/// The output always has the requested dimensions. A zero width or height
/// gives an empty buffer. Generation never fails: degenerate descriptions
/// render as flat color.
pub fn generate_texture(params: &TextureParams) -> TextureData {
    let texture = synthesize(
        params.width,
        params.height,
        params.channels,
        &params.kind,
        &params.post,
    );
    debug!(
        width = texture.width(),
        height = texture.height(),
        channels = texture.channels(),
        "generated texture"
    );
    texture
}

fn synthesize(
    width: u32,
    height: u32,
    channels: u32,
    kind: &TextureKind,
    post: &PostProcess,
) -> TextureData {
    let mut texture = TextureData::new(width, height, channels);
    if texture.is_empty() {
        return texture;
    }

    match kind {
        TextureKind::Noise(p) => render_noise(&mut texture, p),
        TextureKind::Gradient(p) => render_gradient(&mut texture, p),
        TextureKind::Pattern(p) => render_pattern(&mut texture, p),
        TextureKind::Composite(p) => render_composite(&mut texture, p),
    }

    if !post.is_identity() {
        texture.apply(*post);
    }
    texture
}

/// Evaluate `f` at the normalized centre of every pixel
fn fill_with(texture: &mut TextureData, f: impl Fn(f32, f32) -> Color) {
    let (w, h) = (texture.width(), texture.height());
    for y in 0..h {
        let v = (y as f32 + 0.5) / h as f32;
        for x in 0..w {
            let u = (x as f32 + 0.5) / w as f32;
            texture.set_pixel(x, y, f(u, v));
        }
    }
}

fn render_noise(texture: &mut TextureData, params: &NoiseParams) {
    let ramp = ColorRamp::new(&params.colors);
    let field = &params.field;
    let signed = field.is_signed();

    fill_with(texture, |u, v| {
        let value = field.sample(u, v) * params.amplitude;
        let t = if signed { (value + 1.0) * 0.5 } else { value };
        ramp.sample(shape_position(t, 1.0, params.repeat))
    });
}

fn render_gradient(texture: &mut TextureData, params: &GradientParams) {
    let ramp = ColorRamp::new(&params.stops);
    fill_with(texture, |u, v| {
        let t = gradient_position(params, u, v);
        ramp.sample(shape_position(t, params.scale, params.repeat))
    });
}

fn render_pattern(texture: &mut TextureData, params: &PatternParams) {
    fill_with(texture, |u, v| {
        if pattern_selects_a(params, u, v) {
            params.color_a
        } else {
            params.color_b
        }
    });
}

fn render_composite(texture: &mut TextureData, params: &CompositeParams) {
    if params.layers.is_empty() {
        warn!("composite texture has no layers, using fallback color");
        texture.fill(Color::FALLBACK);
        return;
    }

    let (width, height, channels) = (texture.width(), texture.height(), texture.channels());
    for (i, layer) in params.layers.iter().enumerate() {
        // Layers always render at the composite's size
        let rendered = synthesize(width, height, channels, &layer.kind, &layer.post);
        if i == 0 {
            texture.pixels_mut().copy_from_slice(rendered.pixels());
        } else {
            texture.apply(Blend {
                source: &rendered,
                mode: params.blend_mode(i),
                opacity: params.opacity(i),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{NoiseField, NoiseKind};
    use crate::texture::{BlendMode, ColorStop, GradientKind, PatternKind};

    fn sized(width: u32, height: u32, kind: TextureKind) -> TextureParams {
        TextureParams {
            width,
            height,
            channels: 4,
            kind,
            post: PostProcess::default(),
        }
    }

    fn solid_pattern(color: Color) -> TextureKind {
        TextureKind::Pattern(PatternParams {
            kind: PatternKind::Stripes,
            color_a: color,
            color_b: color,
            ..Default::default()
        })
    }

    #[test]
    fn test_dimensions_match_request() {
        for (w, h) in [(1, 1), (17, 5), (64, 64)] {
            let tex = generate_texture(&sized(w, h, TextureKind::default()));
            assert_eq!(tex.width(), w);
            assert_eq!(tex.height(), h);
            assert_eq!(tex.len(), (w * h) as usize);
        }
    }

    #[test]
    fn test_zero_size_gives_empty_buffer() {
        let tex = generate_texture(&sized(0, 32, TextureKind::default()));
        assert!(tex.is_empty());
        assert_eq!(tex.height(), 32);
    }

    #[test]
    fn test_empty_composite_is_gray() {
        let tex = generate_texture(&sized(8, 8, TextureKind::Composite(CompositeParams::default())));
        assert!(tex.pixels().iter().all(|&p| p == Color::rgba(128, 128, 128, 255)));
    }

    #[test]
    fn test_gradient_without_stops_is_gray() {
        let tex = generate_texture(&sized(
            4,
            4,
            TextureKind::Gradient(GradientParams {
                stops: Vec::new(),
                ..Default::default()
            }),
        ));
        assert!(tex.pixels().iter().all(|&p| p == Color::FALLBACK));
    }

    #[test]
    fn test_linear_gradient_increases_along_x() {
        let tex = generate_texture(&sized(16, 2, TextureKind::Gradient(GradientParams::default())));
        let row: Vec<u8> = (0..16).map(|x| tex.get_pixel(x, 0).r).collect();
        assert!(row.windows(2).all(|w| w[0] <= w[1]));
        assert!(row[0] < 16);
        assert!(row[15] > 239);
    }

    #[test]
    fn test_radial_gradient_dark_centre() {
        let tex = generate_texture(&sized(
            9,
            9,
            TextureKind::Gradient(GradientParams {
                kind: GradientKind::Radial,
                ..Default::default()
            }),
        ));
        assert_eq!(tex.get_pixel(4, 4).r, 0);
        assert!(tex.get_pixel(0, 4).r > 200);
    }

    #[test]
    fn test_checkerboard_texture() {
        let tex = generate_texture(&sized(
            8,
            8,
            TextureKind::Pattern(PatternParams {
                kind: PatternKind::Checkerboard,
                scale: 2.0,
                ..Default::default()
            }),
        ));
        assert_eq!(tex.get_pixel(0, 0), Color::WHITE);
        assert_eq!(tex.get_pixel(4, 0), Color::BLACK);
        assert_eq!(tex.get_pixel(4, 4), Color::WHITE);
    }

    #[test]
    fn test_noise_texture_uses_ramp() {
        let red = Color::rgb(255, 0, 0);
        let blue = Color::rgb(0, 0, 255);
        let tex = generate_texture(&sized(
            16,
            16,
            TextureKind::Noise(NoiseParams {
                field: NoiseField::new(NoiseKind::Voronoi, 9),
                colors: vec![ColorStop::new(0.0, red), ColorStop::new(1.0, blue)],
                ..Default::default()
            }),
        ));
        // Every pixel sits on the red-blue line
        assert!(tex.pixels().iter().all(|p| p.g == 0 && p.a == 255));
    }

    #[test]
    fn test_noise_texture_deterministic() {
        let params = sized(
            32,
            32,
            TextureKind::Noise(NoiseParams {
                field: NoiseField::new(NoiseKind::Fractal, 1234),
                ..Default::default()
            }),
        );
        assert_eq!(generate_texture(&params), generate_texture(&params));
    }

    #[test]
    fn test_composite_layers_and_blend() {
        let gray = Color::rgb(128, 128, 128);
        let composite = CompositeParams {
            layers: vec![
                sized(1, 1, solid_pattern(Color::WHITE)),
                sized(1, 1, solid_pattern(gray)),
            ],
            blend_modes: vec![BlendMode::Replace, BlendMode::Multiply],
            opacities: vec![],
        };
        let tex = generate_texture(&sized(6, 3, TextureKind::Composite(composite)));
        // Layers render at the composite's size regardless of their own
        assert_eq!(tex.len(), 18);
        assert!(tex.pixels().iter().all(|&p| p == gray));
    }

    #[test]
    fn test_composite_half_opacity_replace() {
        let composite = CompositeParams {
            layers: vec![
                sized(4, 4, solid_pattern(Color::BLACK)),
                sized(4, 4, solid_pattern(Color::WHITE)),
            ],
            blend_modes: vec![],
            opacities: vec![1.0, 0.5],
        };
        let tex = generate_texture(&sized(4, 4, TextureKind::Composite(composite)));
        let p = tex.get_pixel(2, 2);
        assert!(p.r.abs_diff(128) <= 1);
    }

    #[test]
    fn test_post_process_runs_last() {
        let params = TextureParams {
            post: PostProcess {
                invert: true,
                ..Default::default()
            },
            ..sized(4, 4, solid_pattern(Color::rgb(10, 20, 30)))
        };
        let tex = generate_texture(&params);
        assert_eq!(tex.get_pixel(0, 0), Color::rgb(245, 235, 225));
    }
}
