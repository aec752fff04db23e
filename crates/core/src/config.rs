//! Startup configuration for a deck.
//!
//! Read from JSON; every field is optional and falls back to the defaults
//! below. Unknown preset keys are rejected by [`DeckConfig::validate`], not
//! at parse time, so a config document can be inspected before use.

use crate::controls::Controls;
use crate::error::DeckError;
use crate::preset::{self, Preset, DEFAULT_PRESET};
use crate::scheduler::TickRate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default `noiseFactor` control value.
pub const DEFAULT_NOISE_FACTOR: f32 = 5.0;
/// Default `timeSpeed` control value.
pub const DEFAULT_TIME_SPEED: f32 = 1.0;

/// Reproducible description of a deck's starting state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DeckConfig {
    /// Key of the preset to start with.
    pub preset: String,
    /// Frames per second; `None` follows the display refresh.
    pub tick_rate_hz: Option<f64>,
    pub noise_factor: f32,
    pub time_speed: f32,
    /// Starting values for preset extras, by uniform name.
    pub extras: BTreeMap<String, f32>,
    /// Seed for the randomize action; `None` lets the host pick one.
    pub seed: Option<u64>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            preset: DEFAULT_PRESET.to_string(),
            tick_rate_hz: None,
            noise_factor: DEFAULT_NOISE_FACTOR,
            time_speed: DEFAULT_TIME_SPEED,
            extras: BTreeMap::new(),
            seed: None,
        }
    }
}

impl DeckConfig {
    /// Parses a JSON document. An empty or whitespace-only document yields
    /// the defaults.
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| DeckError::InvalidConfig(e.to_string()))
    }

    /// Checks the preset key and returns the preset.
    pub fn validate(&self) -> Result<&'static Preset, DeckError> {
        preset::lookup(&self.preset)
    }

    /// The configured tick rate.
    pub fn tick_rate(&self) -> TickRate {
        TickRate::from_hz(self.tick_rate_hz)
    }

    /// Initial control state: the shared values plus every configured extra.
    pub fn controls(&self) -> Controls {
        let mut controls = Controls::new(self.noise_factor, self.time_speed);
        for (name, value) in &self.extras {
            controls.set(name, value.to_string());
        }
        controls
    }
}
