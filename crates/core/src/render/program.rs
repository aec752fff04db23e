//! Program manager: builds the live program for a preset.
//!
//! A [`RenderContext`] owns the static quad buffer and at most one
//! [`ActiveProgram`]. Switching presets builds the replacement completely
//! before touching the current one: on success the old program is deleted
//! and its uniform table goes with it; on failure nothing changes.

use super::fullscreen::{POSITION_ATTRIBUTE, QUAD_COMPONENTS, QUAD_VERTICES, VERTEX_SHADER};
use super::gpu::{compile_program, Gpu};
use super::shader::ShaderError;
use crate::error::DeckError;
use crate::preset::{
    Preset, UNIFORM_NOISE_FACTOR, UNIFORM_RESOLUTION, UNIFORM_TIME, UNIFORM_TIME_SPEED,
};

/// Resolved uniform locations of one program.
///
/// `None` entries are uniforms the program does not have; writes to them
/// are dropped.
#[derive(Debug)]
pub struct UniformTable<L> {
    pub time: Option<L>,
    pub resolution: Option<L>,
    pub noise_factor: Option<L>,
    pub time_speed: Option<L>,
    /// Preset extras, in the preset's declaration order.
    pub extras: Vec<(&'static str, Option<L>)>,
}

impl<L> UniformTable<L> {
    /// Looks up the shared uniforms and every extra of `preset` in `program`.
    pub fn resolve<G>(gpu: &G, program: G::Program, preset: &Preset) -> Self
    where
        G: Gpu<UniformLocation = L>,
    {
        Self {
            time: gpu.uniform_location(program, UNIFORM_TIME),
            resolution: gpu.uniform_location(program, UNIFORM_RESOLUTION),
            noise_factor: gpu.uniform_location(program, UNIFORM_NOISE_FACTOR),
            time_speed: gpu.uniform_location(program, UNIFORM_TIME_SPEED),
            extras: preset
                .extras
                .iter()
                .map(|extra| (extra.uniform, gpu.uniform_location(program, extra.uniform)))
                .collect(),
        }
    }

    /// Location of an extra, if the program has it.
    pub fn extra(&self, name: &str) -> Option<&L> {
        self.extras
            .iter()
            .find(|(extra, _)| *extra == name)
            .and_then(|(_, location)| location.as_ref())
    }

    /// Names of all uniforms that resolved to a location.
    pub fn resolved_names(&self) -> Vec<&'static str> {
        let shared = [
            (UNIFORM_TIME, self.time.is_some()),
            (UNIFORM_RESOLUTION, self.resolution.is_some()),
            (UNIFORM_NOISE_FACTOR, self.noise_factor.is_some()),
            (UNIFORM_TIME_SPEED, self.time_speed.is_some()),
        ];
        shared
            .into_iter()
            .chain(self.extras.iter().map(|(name, loc)| (*name, loc.is_some())))
            .filter_map(|(name, found)| found.then_some(name))
            .collect()
    }
}

/// The linked program of the current preset and everything resolved from it.
pub struct ActiveProgram<G: Gpu> {
    preset: &'static Preset,
    program: G::Program,
    uniforms: UniformTable<G::UniformLocation>,
    position: Option<u32>,
}

impl<G: Gpu> ActiveProgram<G> {
    pub fn preset(&self) -> &'static Preset {
        self.preset
    }

    pub fn program(&self) -> G::Program {
        self.program
    }

    pub fn uniforms(&self) -> &UniformTable<G::UniformLocation> {
        &self.uniforms
    }

    /// Location of `aVertexPosition`, if the program uses it.
    pub fn position_attribute(&self) -> Option<u32> {
        self.position
    }
}

/// Owner of the quad buffer and the single live program.
pub struct RenderContext<G: Gpu> {
    quad: G::Buffer,
    active: Option<ActiveProgram<G>>,
}

impl<G: Gpu> RenderContext<G> {
    /// Uploads the full-screen quad. No program is live until
    /// [`select_preset`](Self::select_preset) succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Gpu`] if the buffer cannot be created.
    pub fn new(gpu: &G) -> Result<Self, DeckError> {
        let quad = gpu
            .create_vertex_buffer(&QUAD_VERTICES)
            .map_err(DeckError::Gpu)?;
        Ok(Self { quad, active: None })
    }

    /// The live program, if any.
    pub fn active(&self) -> Option<&ActiveProgram<G>> {
        self.active.as_ref()
    }

    /// The preset of the live program, if any.
    pub fn preset(&self) -> Option<&'static Preset> {
        self.active.as_ref().map(ActiveProgram::preset)
    }

    /// Builds `preset` and makes it the live program.
    ///
    /// The previous program is deleted only after the new one linked. If
    /// building fails the diagnostic is logged, the previous program stays
    /// live and current, and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns the [`ShaderError`] from compiling or linking.
    pub fn select_preset(&mut self, gpu: &G, preset: &'static Preset) -> Result<(), ShaderError> {
        let next = match self.build(gpu, preset) {
            Ok(next) => next,
            Err(e) => {
                log::error!("unable to initialize the '{}' program: {e}", preset.key);
                return Err(e);
            }
        };

        if let Some(previous) = self.active.replace(next) {
            log::debug!("releasing '{}' program", previous.preset.key);
            gpu.delete_program(previous.program);
        }
        log::info!("preset '{}' is live", preset.key);
        Ok(())
    }

    fn build(&self, gpu: &G, preset: &'static Preset) -> Result<ActiveProgram<G>, ShaderError> {
        let program = compile_program(gpu, VERTEX_SHADER, preset.fragment)?;
        gpu.use_program(Some(program));

        let uniforms = UniformTable::resolve(gpu, program, preset);
        let position = gpu.attrib_location(program, POSITION_ATTRIBUTE);
        match position {
            Some(location) => gpu.bind_vertex_attrib(self.quad, location, QUAD_COMPONENTS),
            None => log::warn!("'{}' program has no {POSITION_ATTRIBUTE}", preset.key),
        }
        log::debug!(
            "linked '{}' with uniforms {:?}",
            preset.key,
            uniforms.resolved_names()
        );

        Ok(ActiveProgram {
            preset,
            program,
            uniforms,
            position,
        })
    }

    /// Deletes the live program and the quad buffer.
    pub fn release(self, gpu: &G) {
        gpu.use_program(None);
        if let Some(active) = self.active {
            gpu.delete_program(active.program);
        }
        gpu.delete_buffer(self.quad);
    }
}
