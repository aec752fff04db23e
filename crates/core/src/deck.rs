//! The deck: one owner for everything a running effect needs.
//!
//! A [`Deck`] holds the render context (live program and quad), the control
//! text, the frame scheduler and the randomizer. Hosts keep exactly one and
//! hand it to each callback by `&mut`, so frame ticks and control updates
//! never interleave.

use crate::config::DeckConfig;
use crate::controls::Controls;
use crate::error::DeckError;
use crate::preset::{self, Preset};
use crate::random::{RandomizedControls, Xorshift64};
use crate::render::{draw_frame, FrameUniforms, Gpu, RenderContext};
use crate::scheduler::{Tick, TickScheduler};

/// Running state of one canvas.
pub struct Deck<G: Gpu> {
    context: RenderContext<G>,
    controls: Controls,
    scheduler: TickScheduler,
    rng: Xorshift64,
}

impl<G: Gpu> Deck<G> {
    /// Builds the quad and the configured preset's program.
    ///
    /// `fallback_seed` seeds the randomizer when the config has none.
    ///
    /// # Errors
    ///
    /// Fails on an unknown preset key, a buffer allocation failure, or if
    /// the initial program does not compile or link; in every case the GPU
    /// objects created so far are released.
    pub fn new(gpu: &G, config: &DeckConfig, fallback_seed: u64) -> Result<Self, DeckError> {
        let preset = config.validate()?;
        let mut context = RenderContext::new(gpu)?;
        if let Err(e) = context.select_preset(gpu, preset) {
            context.release(gpu);
            return Err(e.into());
        }

        let mut controls = config.controls();
        controls.ensure_defaults(preset);

        Ok(Self {
            context,
            controls,
            scheduler: TickScheduler::new(config.tick_rate()),
            rng: Xorshift64::new(config.seed.unwrap_or(fallback_seed)),
        })
    }

    /// The preset currently on screen.
    pub fn preset(&self) -> Option<&'static Preset> {
        self.context.preset()
    }

    pub fn context(&self) -> &RenderContext<G> {
        &self.context
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Switches to the preset named `key`.
    ///
    /// # Errors
    ///
    /// Unknown keys and build failures leave the current preset live.
    pub fn select_preset(&mut self, gpu: &G, key: &str) -> Result<(), DeckError> {
        let preset = preset::lookup(key)?;
        self.context.select_preset(gpu, preset)?;
        self.controls.ensure_defaults(preset);
        Ok(())
    }

    /// Replaces the text of a control. Takes effect on the next frame.
    pub fn set_control(&mut self, name: &str, text: &str) {
        self.controls.set(name, text);
    }

    /// Draws new shared control values. Takes effect on the next frame.
    pub fn randomize(&mut self) -> RandomizedControls {
        let draw = self.controls.randomize(&mut self.rng);
        log::debug!(
            "randomized noiseFactor={} timeSpeed={}",
            draw.noise_factor,
            draw.time_speed
        );
        draw
    }

    /// Offers a host timestamp; draws a frame if the scheduler says one is due.
    ///
    /// Returns the tick that was rendered, if any.
    pub fn frame(&mut self, gpu: &G, now_ms: f64, width: u32, height: u32) -> Option<Tick> {
        let tick = self.scheduler.poll(now_ms)?;
        let preset = self.context.preset()?;
        let uniforms = FrameUniforms::gather(tick.elapsed, width, height, &self.controls, preset);
        draw_frame(gpu, &self.context, width, height, &uniforms);
        Some(tick)
    }

    /// Releases the program and quad buffer.
    pub fn release(self, gpu: &G) {
        self.context.release(gpu);
    }
}
