//! Recording [`Gpu`] double for unit tests.
//!
//! Compiles whatever passes [`check_glsl`], resolves uniforms and
//! attributes from their declarations, and records every call so tests can
//! assert on the exact command stream.

use super::glsl_check::check_glsl;
use super::gpu::Gpu;
use super::shader::{format_shader_error, ShaderError, ShaderStage};
use crate::preset::declared_uniforms;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// Uniform location handed out by [`RecordingGpu`].
#[derive(Debug, Clone, PartialEq)]
pub struct Loc {
    pub program: u32,
    pub name: String,
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CompileShader(ShaderStage),
    LinkProgram,
    DeleteShader(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    CreateBuffer(usize),
    DeleteBuffer(u32),
    BindVertexAttrib {
        buffer: u32,
        location: u32,
        components: i32,
    },
    Uniform1f {
        location: Loc,
        value: f32,
    },
    Uniform2f {
        location: Loc,
        x: f32,
        y: f32,
    },
    BeginFrame(u32, u32),
    Draw(i32),
}

#[derive(Default)]
struct State {
    next_id: u32,
    shaders: BTreeMap<u32, String>,
    programs: BTreeMap<u32, String>,
    buffers: BTreeSet<u32>,
    calls: Vec<Call>,
}

impl State {
    fn id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct RecordingGpu {
    state: RefCell<State>,
    fail_link: bool,
}

impl RecordingGpu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every link attempt fails from now on.
    pub fn failing_link(mut self) -> Self {
        self.fail_link = true;
        self
    }

    pub fn set_failing_link(&mut self, fail: bool) {
        self.fail_link = fail;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    pub fn is_live_program(&self, program: u32) -> bool {
        self.state.borrow().programs.contains_key(&program)
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl Gpu for RecordingGpu {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type UniformLocation = Loc;

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<u32, ShaderError> {
        self.record(Call::CompileShader(stage));
        if let Err(reason) = check_glsl(stage, source) {
            return Err(ShaderError::Compile {
                stage,
                log: format_shader_error(source, &format!("ERROR: {reason}")),
            });
        }
        let mut state = self.state.borrow_mut();
        let id = state.id();
        state.shaders.insert(id, source.to_string());
        Ok(id)
    }

    fn link_program(&self, vertex: u32, fragment: u32) -> Result<u32, ShaderError> {
        self.record(Call::LinkProgram);
        if self.fail_link {
            return Err(ShaderError::Link("ERROR: interface mismatch".into()));
        }
        let mut state = self.state.borrow_mut();
        let source = format!("{}\n{}", state.shaders[&vertex], state.shaders[&fragment]);
        let id = state.id();
        state.programs.insert(id, source);
        Ok(id)
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
        self.state.borrow_mut().shaders.remove(&shader);
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
        self.state.borrow_mut().programs.remove(&program);
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<Loc> {
        let state = self.state.borrow();
        let source = state.programs.get(&program)?;
        let found = declared_uniforms(source).any(|declared| declared == name);
        found.then(|| Loc {
            program,
            name: name.to_string(),
        })
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        let state = self.state.borrow();
        let source = state.programs.get(&program)?;
        let index = source
            .lines()
            .filter_map(|line| line.trim().strip_prefix("attribute "))
            .position(|decl| decl.trim_end_matches(';').split_whitespace().last() == Some(name));
        index.map(|index| index as u32)
    }

    fn create_vertex_buffer(&self, data: &[f32]) -> Result<u32, String> {
        self.record(Call::CreateBuffer(data.len()));
        let mut state = self.state.borrow_mut();
        let id = state.id();
        state.buffers.insert(id);
        Ok(id)
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
        self.state.borrow_mut().buffers.remove(&buffer);
    }

    fn bind_vertex_attrib(&self, buffer: u32, location: u32, components: i32) {
        self.record(Call::BindVertexAttrib {
            buffer,
            location,
            components,
        });
    }

    fn set_uniform_1f(&self, location: Option<&Loc>, value: f32) {
        if let Some(location) = location {
            self.record(Call::Uniform1f {
                location: location.clone(),
                value,
            });
        }
    }

    fn set_uniform_2f(&self, location: Option<&Loc>, x: f32, y: f32) {
        if let Some(location) = location {
            self.record(Call::Uniform2f {
                location: location.clone(),
                x,
                y,
            });
        }
    }

    fn begin_frame(&self, width: u32, height: u32) {
        self.record(Call::BeginFrame(width, height));
    }

    fn draw_triangle_strip(&self, count: i32) {
        self.record(Call::Draw(count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::gpu::compile_program;
    use crate::render::VERTEX_SHADER;

    const FRAG: &str = "precision mediump float;\nuniform float time;\nuniform vec2 resolution;\nvoid main(void) {\n    gl_FragColor = vec4(gl_FragCoord.xy / resolution, time, 1.0);\n}\n";

    #[test]
    fn uniform_location_resolves_declared_names_only() {
        let gpu = RecordingGpu::new();
        let program = compile_program(&gpu, VERTEX_SHADER, FRAG).unwrap();
        let time = gpu.uniform_location(program, "time");
        assert_eq!(
            time,
            Some(Loc {
                program,
                name: "time".into()
            })
        );
        assert!(gpu.uniform_location(program, "resolution").is_some());
        assert!(gpu.uniform_location(program, "noiseFactor").is_none());
        assert!(gpu.uniform_location(program + 100, "time").is_none());
    }

    #[test]
    fn attrib_location_counts_attribute_declarations() {
        let gpu = RecordingGpu::new();
        let program = compile_program(&gpu, VERTEX_SHADER, FRAG).unwrap();
        assert_eq!(gpu.attrib_location(program, "aVertexPosition"), Some(0));
        assert_eq!(gpu.attrib_location(program, "aTexCoord"), None);
    }

    #[test]
    fn compile_rejects_glsl_that_fails_static_checks() {
        let gpu = RecordingGpu::new();
        let broken = FRAG.replace("/ resolution", "/ resolutoin");
        let err = gpu.compile_shader(ShaderStage::Fragment, &broken).unwrap_err();
        assert!(err.to_string().contains("resolutoin"), "{err}");
        assert_eq!(gpu.live_shaders(), 0);
    }
}
