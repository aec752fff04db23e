//! Error types for the shaderdeck core.

use crate::render::shader::ShaderError;
use thiserror::Error;

/// Errors produced by deck operations.
#[derive(Debug, Error)]
pub enum DeckError {
    /// A preset key did not match any registered preset.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// Width or height was zero when rasterizing or sizing the canvas.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// Building the program for a preset failed.
    #[error(transparent)]
    Shader(#[from] ShaderError),

    /// The graphics backend refused to allocate a resource.
    #[error("gpu error: {0}")]
    Gpu(String),

    /// A configuration document could not be understood.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Writing an output artifact failed.
    #[error("io error: {0}")]
    Io(String),
}
