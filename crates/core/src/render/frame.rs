//! Frame driver: one clear, one uniform push, one draw per tick.

use super::fullscreen::QUAD_VERTEX_COUNT;
use super::gpu::Gpu;
use super::program::RenderContext;
use crate::controls::Controls;
use crate::preset::Preset;

/// Uniform values for a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUniforms {
    /// Seconds since the loop started.
    pub time: f32,
    /// Canvas width and height in pixels.
    pub resolution: [f32; 2],
    pub noise_factor: f32,
    pub time_speed: f32,
    /// Preset extras by uniform name.
    pub extras: Vec<(&'static str, f32)>,
}

impl FrameUniforms {
    /// Reads the current control values for `preset`.
    ///
    /// Nothing is validated: malformed control text arrives here as `NaN`.
    pub fn gather(time: f32, width: u32, height: u32, controls: &Controls, preset: &Preset) -> Self {
        Self {
            time,
            resolution: [width as f32, height as f32],
            noise_factor: controls.noise_factor(),
            time_speed: controls.time_speed(),
            extras: preset
                .extras
                .iter()
                .map(|extra| (extra.uniform, controls.value(extra.uniform)))
                .collect(),
        }
    }

    /// Value of an extra, if present.
    pub fn extra(&self, name: &str) -> Option<f32> {
        self.extras
            .iter()
            .find(|(extra, _)| *extra == name)
            .map(|(_, value)| *value)
    }
}

/// Draws one frame with the live program of `ctx`.
///
/// Sets the viewport and clears, then writes `time`, `resolution`,
/// `noiseFactor`, `timeSpeed` and the live program's extras, and draws the
/// quad as a 4-vertex triangle strip. Uniforms the program lacks are
/// skipped, and only the live program's table is ever consulted. With no
/// live program the frame is cleared and nothing is drawn.
///
/// Returns whether a draw call was issued.
pub fn draw_frame<G: Gpu>(
    gpu: &G,
    ctx: &RenderContext<G>,
    width: u32,
    height: u32,
    uniforms: &FrameUniforms,
) -> bool {
    gpu.begin_frame(width, height);

    let Some(active) = ctx.active() else {
        return false;
    };
    let table = active.uniforms();

    gpu.set_uniform_1f(table.time.as_ref(), uniforms.time);
    gpu.set_uniform_2f(
        table.resolution.as_ref(),
        uniforms.resolution[0],
        uniforms.resolution[1],
    );
    gpu.set_uniform_1f(table.noise_factor.as_ref(), uniforms.noise_factor);
    gpu.set_uniform_1f(table.time_speed.as_ref(), uniforms.time_speed);
    for (name, location) in &table.extras {
        if let Some(value) = uniforms.extra(name) {
            gpu.set_uniform_1f(location.as_ref(), value);
        }
    }

    gpu.draw_triangle_strip(QUAD_VERTEX_COUNT);
    true
}
