//! The graphics surface the program manager and frame driver run against.
//!
//! `Gpu` is the immediate-mode subset of GL that shaderdeck needs. The
//! production implementation wraps a `glow::Context`
//! ([`GlContext`](super::GlContext), `render` feature); tests use a
//! recording double.

use super::shader::{ShaderError, ShaderStage};

/// Immediate-mode shader program lifecycle and draw calls.
pub trait Gpu {
    /// Compiled shader object.
    type Shader: Copy;
    /// Linked program object.
    type Program: Copy + PartialEq;
    /// Vertex buffer object.
    type Buffer: Copy;
    /// Resolved uniform location.
    type UniformLocation;

    /// Compiles one shader stage.
    ///
    /// On failure the shader object is released and the info log is
    /// returned in [`ShaderError::Compile`].
    fn compile_shader(&self, stage: ShaderStage, source: &str)
        -> Result<Self::Shader, ShaderError>;

    /// Links a vertex and a fragment shader.
    ///
    /// On failure the program object is released and the info log is
    /// returned in [`ShaderError::Link`].
    fn link_program(
        &self,
        vertex: Self::Shader,
        fragment: Self::Shader,
    ) -> Result<Self::Program, ShaderError>;

    fn delete_shader(&self, shader: Self::Shader);

    fn delete_program(&self, program: Self::Program);

    /// Makes `program` current for subsequent uniform writes and draws.
    fn use_program(&self, program: Option<Self::Program>);

    /// `None` means the program has no active uniform with that name.
    fn uniform_location(&self, program: Self::Program, name: &str)
        -> Option<Self::UniformLocation>;

    /// `None` means the program has no active attribute with that name.
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;

    /// Creates a buffer holding `data` with static usage.
    fn create_vertex_buffer(&self, data: &[f32]) -> Result<Self::Buffer, String>;

    fn delete_buffer(&self, buffer: Self::Buffer);

    /// Binds `buffer` and points the float attribute at `location` into it.
    fn bind_vertex_attrib(&self, buffer: Self::Buffer, location: u32, components: i32);

    /// Writes a float uniform. `None` is a silent no-op.
    fn set_uniform_1f(&self, location: Option<&Self::UniformLocation>, value: f32);

    /// Writes a vec2 uniform. `None` is a silent no-op.
    fn set_uniform_2f(&self, location: Option<&Self::UniformLocation>, x: f32, y: f32);

    /// Sets the viewport to the full canvas and clears the color buffer.
    fn begin_frame(&self, width: u32, height: u32);

    /// Draws `count` vertices from the bound buffer as a triangle strip.
    fn draw_triangle_strip(&self, count: i32);
}

/// Compiles vertex and fragment sources and links them into a program.
///
/// Shader objects are released after linking regardless of the outcome;
/// the program keeps what it needs.
///
/// # Errors
///
/// Returns [`ShaderError::Compile`] if either stage fails to compile, or
/// [`ShaderError::Link`] if linking fails.
pub fn compile_program<G: Gpu>(
    gpu: &G,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<G::Program, ShaderError> {
    let vertex = gpu.compile_shader(ShaderStage::Vertex, vertex_src)?;
    let fragment = match gpu.compile_shader(ShaderStage::Fragment, fragment_src) {
        Ok(shader) => shader,
        Err(e) => {
            gpu.delete_shader(vertex);
            return Err(e);
        }
    };

    let linked = gpu.link_program(vertex, fragment);

    gpu.delete_shader(vertex);
    gpu.delete_shader(fragment);

    linked
}
