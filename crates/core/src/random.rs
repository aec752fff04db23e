//! Randomized control values.
//!
//! The randomize action draws fresh values for the two shared controls
//! from a small xorshift generator. Values are rounded to one decimal so
//! they read cleanly when written back into a text control.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Range drawn from for `noiseFactor`.
pub const NOISE_FACTOR_RANGE: RangeInclusive<f32> = 0.1..=10.0;
/// Range drawn from for `timeSpeed`.
pub const TIME_SPEED_RANGE: RangeInclusive<f32> = 0.1..=2.0;

/// Xorshift64 generator with shifts (13, 7, 17).
///
/// Seed 0 is a fixed point of the algorithm and is replaced by a
/// non-zero fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a value in `range` rounded to one decimal place.
    ///
    /// Rounding is clamped back into the range so the bounds hold even
    /// when an endpoint is not a multiple of 0.1.
    pub fn next_tenth(&mut self, range: &RangeInclusive<f32>) -> f32 {
        let (lo, hi) = (f64::from(*range.start()), f64::from(*range.end()));
        let raw = lo + self.next_f64() * (hi - lo);
        (round_tenth(raw as f32)).clamp(*range.start(), *range.end())
    }
}

/// Rounds to one decimal place.
pub fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// A freshly drawn pair of shared control values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RandomizedControls {
    #[serde(rename = "noiseFactor")]
    pub noise_factor: f32,
    #[serde(rename = "timeSpeed")]
    pub time_speed: f32,
}

impl RandomizedControls {
    /// Draws noise factor then time speed from their ranges.
    pub fn draw(rng: &mut Xorshift64) -> Self {
        let noise_factor = rng.next_tenth(&NOISE_FACTOR_RANGE);
        let time_speed = rng.next_tenth(&TIME_SPEED_RANGE);
        Self {
            noise_factor,
            time_speed,
        }
    }
}
