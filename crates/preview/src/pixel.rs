//! Pure-computation RGBA8 rasterization of a preset.
//!
//! Always available (no feature gate) so that the `png` snapshot path and
//! any in-memory consumer share the same conversion.

use glam::{Vec2, Vec3};
use shaderdeck_core::error::DeckError;
use shaderdeck_core::preset::Preset;
use shaderdeck_core::render::FrameUniforms;
use shaderdeck_core::shade::shade;

/// Quantizes a shaded color to RGBA8 with full alpha.
///
/// Channels are clamped to [0, 1] the way a fixed-point framebuffer stores
/// them; `NaN` becomes 0.
pub fn color_to_rgba(color: Vec3) -> [u8; 4] {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [channel(color.x), channel(color.y), channel(color.z), 255]
}

/// Shades every pixel of a `width` x `height` canvas.
///
/// Pixels are sampled at their centres with a bottom-left origin, matching
/// `gl_FragCoord`; the buffer is written top row first, as image formats
/// expect. Its length is `width * height * 4`.
pub fn shade_rgba(
    preset: &Preset,
    width: u32,
    height: u32,
    uniforms: &FrameUniforms,
) -> Result<Vec<u8>, DeckError> {
    if width == 0 || height == 0 {
        return Err(DeckError::InvalidDimensions);
    }
    let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
    for row in 0..height {
        let y = (height - 1 - row) as f32 + 0.5;
        for col in 0..width {
            let frag_coord = Vec2::new(col as f32 + 0.5, y);
            let color = shade(preset, frag_coord, uniforms)
                .ok_or_else(|| DeckError::UnknownPreset(preset.key.to_string()))?;
            rgba.extend_from_slice(&color_to_rgba(color));
        }
    }
    Ok(rgba)
}
