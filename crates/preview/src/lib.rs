#![deny(unsafe_code)]
//! Preset previews without a GL context.
//!
//! This crate sits between `shaderdeck-core` (which defines the presets and
//! their CPU mirror) and the CLI. It turns a preset plus a frame's uniforms
//! into an RGBA8 buffer and, with the `png` feature, a PNG file.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use shaderdeck_core::config::DeckConfig;
use shaderdeck_core::error::DeckError;
use shaderdeck_core::preset::Preset;
use shaderdeck_core::render::FrameUniforms;

/// Everything needed to shade one still frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Still {
    pub preset: &'static Preset,
    pub width: u32,
    pub height: u32,
    pub uniforms: FrameUniforms,
}

impl Still {
    /// The frame a deck built from `config` would draw `time` seconds in.
    ///
    /// Control values go through the same text bridge as a live deck, and
    /// extras the config leaves out use the preset defaults.
    ///
    /// Returns `DeckError::UnknownPreset` for unregistered keys and
    /// `DeckError::InvalidDimensions` if either dimension is zero.
    pub fn from_config(
        config: &DeckConfig,
        width: u32,
        height: u32,
        time: f32,
    ) -> Result<Self, DeckError> {
        let preset = config.validate()?;
        if width == 0 || height == 0 {
            return Err(DeckError::InvalidDimensions);
        }
        let mut controls = config.controls();
        controls.ensure_defaults(preset);
        Ok(Self {
            preset,
            width,
            height,
            uniforms: FrameUniforms::gather(time, width, height, &controls, preset),
        })
    }

    /// Rasterizes the still into RGBA8, rows top-first.
    pub fn to_rgba(&self) -> Result<Vec<u8>, DeckError> {
        pixel::shade_rgba(self.preset, self.width, self.height, &self.uniforms)
    }
}
