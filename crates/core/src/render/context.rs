//! `glow` implementation of [`Gpu`].
//!
//! `GlContext` wraps a `glow::Context` created from a browser WebGL2
//! context or a native OpenGL ES context. The preset shaders are unversioned
//! GLSL ES 1.00; desktop core profiles reject them.

use super::gpu::Gpu;
use super::shader::{format_shader_error, ShaderError, ShaderStage};
use glow::HasContext;

/// A `glow::Context` driven through the [`Gpu`] trait.
pub struct GlContext {
    gl: glow::Context,
}

impl GlContext {
    /// Wraps `gl` and logs the driver version.
    #[allow(unsafe_code)]
    pub fn new(gl: glow::Context) -> Self {
        // SAFETY: querying a string parameter has no preconditions.
        let version = unsafe { gl.get_parameter_string(glow::VERSION) };
        log::info!("GL context: {version}");
        if !gl.version().is_embedded {
            log::warn!("desktop GL context: GLSL ES 1.00 presets will not compile");
        }
        Self { gl }
    }

    /// Returns a reference to the underlying `glow::Context`.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Consumes this wrapper and returns the underlying `glow::Context`.
    pub fn into_gl(self) -> glow::Context {
        self.gl
    }
}

// SAFETY (all blocks below): glow marks raw GL entry points unsafe. Every
// handle passed in was produced by this context through the same trait, and
// enum arguments are glow constants valid for the call.
#[allow(unsafe_code)]
impl Gpu for GlContext {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type Buffer = glow::Buffer;
    type UniformLocation = glow::UniformLocation;

    fn compile_shader(
        &self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<glow::Shader, ShaderError> {
        let kind = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        let gl = &self.gl;

        let shader = unsafe { gl.create_shader(kind) }
            .map_err(|log| ShaderError::Compile { stage, log })?;

        unsafe {
            gl.shader_source(shader, source);
            gl.compile_shader(shader);
        }

        if unsafe { gl.get_shader_compile_status(shader) } {
            Ok(shader)
        } else {
            let info_log = unsafe { gl.get_shader_info_log(shader) };
            unsafe { gl.delete_shader(shader) };
            Err(ShaderError::Compile {
                stage,
                log: format_shader_error(source, &info_log),
            })
        }
    }

    fn link_program(
        &self,
        vertex: glow::Shader,
        fragment: glow::Shader,
    ) -> Result<glow::Program, ShaderError> {
        let gl = &self.gl;
        let program = unsafe { gl.create_program() }.map_err(ShaderError::Link)?;

        unsafe {
            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);

            // The program keeps its own copy of the linked binary.
            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);
        }

        if unsafe { gl.get_program_link_status(program) } {
            Ok(program)
        } else {
            let info_log = unsafe { gl.get_program_info_log(program) };
            unsafe { gl.delete_program(program) };
            Err(ShaderError::Link(info_log))
        }
    }

    fn delete_shader(&self, shader: glow::Shader) {
        unsafe { self.gl.delete_shader(shader) };
    }

    fn delete_program(&self, program: glow::Program) {
        unsafe { self.gl.delete_program(program) };
    }

    fn use_program(&self, program: Option<glow::Program>) {
        unsafe { self.gl.use_program(program) };
    }

    fn uniform_location(
        &self,
        program: glow::Program,
        name: &str,
    ) -> Option<glow::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn attrib_location(&self, program: glow::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn create_vertex_buffer(&self, data: &[f32]) -> Result<glow::Buffer, String> {
        let gl = &self.gl;
        let buffer = unsafe { gl.create_buffer()? };
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(data),
                glow::STATIC_DRAW,
            );
        }
        Ok(buffer)
    }

    fn delete_buffer(&self, buffer: glow::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) };
    }

    fn bind_vertex_attrib(&self, buffer: glow::Buffer, location: u32, components: i32) {
        let gl = &self.gl;
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_f32(location, components, glow::FLOAT, false, 0, 0);
        }
    }

    fn set_uniform_1f(&self, location: Option<&glow::UniformLocation>, value: f32) {
        unsafe { self.gl.uniform_1_f32(location, value) };
    }

    fn set_uniform_2f(&self, location: Option<&glow::UniformLocation>, x: f32, y: f32) {
        unsafe { self.gl.uniform_2_f32(location, x, y) };
    }

    fn begin_frame(&self, width: u32, height: u32) {
        let gl = &self.gl;
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        unsafe {
            gl.viewport(0, 0, w, h);
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn draw_triangle_strip(&self, count: i32) {
        unsafe { self.gl.draw_arrays(glow::TRIANGLE_STRIP, 0, count) };
    }
}
