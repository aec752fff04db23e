//! Shader program management and the per-frame draw.
//!
//! # Module overview
//!
//! - [`shader`] -- Shader stages, errors and diagnostic formatting.
//! - [`fullscreen`] -- Full-screen quad vertices and the shared vertex shader.
//! - [`gpu`] -- The `Gpu` trait and `compile_program`.
//! - [`program`] -- Program manager: `RenderContext` and the live program.
//! - [`frame`] -- Frame driver: uniform push and draw.
//! - [`context`] -- `glow` implementation of `Gpu` (`render` feature).

#[cfg(feature = "render")]
pub mod context;
pub mod frame;
pub mod fullscreen;
pub mod gpu;
pub mod program;
pub mod shader;

#[cfg(test)]
mod glsl_check;
#[cfg(test)]
pub(crate) mod testing;

#[cfg(feature = "render")]
pub use context::GlContext;
pub use frame::{draw_frame, FrameUniforms};
pub use fullscreen::{QUAD_VERTICES, VERTEX_SHADER};
pub use gpu::{compile_program, Gpu};
pub use program::{ActiveProgram, RenderContext, UniformTable};
pub use shader::{format_shader_error, ShaderError, ShaderStage};
