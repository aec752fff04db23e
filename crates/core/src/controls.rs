//! Bridge between user controls and uniform values.
//!
//! Controls hold raw text exactly as the user typed it, keyed by uniform
//! name. Values are parsed on every read so the frame loop always sees the
//! current text; malformed text reads as `NaN` and flows into the shader.

use crate::params::parse_control;
use crate::preset::{Preset, UNIFORM_NOISE_FACTOR, UNIFORM_TIME_SPEED};
use crate::random::{RandomizedControls, Xorshift64};
use std::collections::BTreeMap;

/// Live text of every numeric control.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Controls {
    text: BTreeMap<String, String>,
}

impl Controls {
    /// Creates controls with the two shared values set.
    pub fn new(noise_factor: f32, time_speed: f32) -> Self {
        let mut controls = Self::default();
        controls.set(UNIFORM_NOISE_FACTOR, noise_factor.to_string());
        controls.set(UNIFORM_TIME_SPEED, time_speed.to_string());
        controls
    }

    /// Replaces the text of a control.
    pub fn set(&mut self, name: &str, text: impl Into<String>) {
        self.text.insert(name.to_string(), text.into());
    }

    /// Raw text of a control, if it has been set.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.text.get(name).map(String::as_str)
    }

    /// Parsed value of a control. Unset controls read as `NaN`.
    pub fn value(&self, name: &str) -> f32 {
        self.text(name).map_or(f32::NAN, parse_control)
    }

    /// Current `noiseFactor` value.
    pub fn noise_factor(&self) -> f32 {
        self.value(UNIFORM_NOISE_FACTOR)
    }

    /// Current `timeSpeed` value.
    pub fn time_speed(&self) -> f32 {
        self.value(UNIFORM_TIME_SPEED)
    }

    /// Seeds default text for the preset's extras that were never set.
    ///
    /// Text the user already typed is kept, so switching away from a
    /// preset and back restores its values.
    pub fn ensure_defaults(&mut self, preset: &Preset) {
        for extra in preset.extras {
            self.text
                .entry(extra.uniform.to_string())
                .or_insert_with(|| extra.default.to_string());
        }
    }

    /// Overwrites the shared controls with freshly drawn values.
    ///
    /// Only the control text changes; the next frame reads it.
    pub fn randomize(&mut self, rng: &mut Xorshift64) -> RandomizedControls {
        let draw = RandomizedControls::draw(rng);
        self.set(UNIFORM_NOISE_FACTOR, format!("{:.1}", draw.noise_factor));
        self.set(UNIFORM_TIME_SPEED, format!("{:.1}", draw.time_speed));
        draw
    }
}
