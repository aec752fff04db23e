#![deny(unsafe_code)]
//! Core of the shader deck: a small set of animated full-screen shader
//! presets drawn onto one canvas.
//!
//! Provides the preset catalog (`Preset`, `PRESETS`), the control bridge
//! (`Controls`), the program manager and frame driver under [`render`],
//! the `TickScheduler`, the `Xorshift64` randomizer, the `DeckConfig` JSON
//! config, and the `Deck` that ties them together. [`shade`] mirrors the
//! preset math on the CPU for previews.

pub mod config;
pub mod controls;
pub mod deck;
pub mod error;
pub mod params;
pub mod preset;
pub mod random;
pub mod render;
pub mod scheduler;
pub mod shade;

pub use config::DeckConfig;
pub use controls::Controls;
pub use deck::Deck;
pub use error::DeckError;
pub use preset::{Preset, PRESETS};
pub use random::{RandomizedControls, Xorshift64};
pub use scheduler::{Tick, TickRate, TickScheduler};
