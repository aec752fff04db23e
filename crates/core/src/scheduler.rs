//! Cooperative frame scheduler.
//!
//! The host polls the scheduler with its own clock (milliseconds, e.g. the
//! `requestAnimationFrame` timestamp). The scheduler decides whether a frame
//! is due and reports the elapsed time since the first frame, which feeds
//! the `time` uniform.

/// How often frames are produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickRate {
    /// Every poll, i.e. the host's display refresh cadence.
    Display,
    /// At most this many frames per second.
    Hz(f64),
}

impl TickRate {
    /// Builds a tick rate from an optional frames-per-second setting.
    ///
    /// `None`, non-positive or non-finite rates, and rates so small that
    /// the frame interval overflows, mean [`TickRate::Display`].
    pub fn from_hz(hz: Option<f64>) -> Self {
        match hz {
            Some(r) if r.is_finite() && r > 0.0 && (1000.0 / r).is_finite() => TickRate::Hz(r),
            _ => TickRate::Display,
        }
    }

    fn interval_ms(self) -> Option<f64> {
        match self {
            TickRate::Display => None,
            TickRate::Hz(r) => Some(1000.0 / r),
        }
    }
}

/// A frame the scheduler decided to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Zero-based index of this frame.
    pub frame: u64,
    /// Seconds since the first frame.
    pub elapsed: f32,
}

/// Decides which host callbacks turn into frames.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    rate: TickRate,
    started_at: Option<f64>,
    next_due: f64,
    frames: u64,
}

impl TickScheduler {
    /// Creates a scheduler that has not seen any timestamp yet.
    pub fn new(rate: TickRate) -> Self {
        Self {
            rate,
            started_at: None,
            next_due: 0.0,
            frames: 0,
        }
    }

    /// The configured rate.
    pub fn rate(&self) -> TickRate {
        self.rate
    }

    /// Frames produced so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Offers a host timestamp. Returns the tick to render, if one is due.
    ///
    /// The first poll always ticks with zero elapsed time. Timestamps that
    /// go backwards are treated as no time passing.
    pub fn poll(&mut self, now_ms: f64) -> Option<Tick> {
        let start = *self.started_at.get_or_insert(now_ms);
        let now_ms = now_ms.max(start);

        if let Some(interval) = self.rate.interval_ms() {
            if self.frames > 0 && now_ms < self.next_due {
                return None;
            }
            // Keep a fixed cadence; re-anchor if the host fell behind.
            self.next_due = if self.frames > 0 && now_ms - self.next_due < interval {
                self.next_due + interval
            } else {
                now_ms + interval
            };
        }

        let tick = Tick {
            frame: self.frames,
            elapsed: ((now_ms - start) / 1000.0) as f32,
        };
        self.frames += 1;
        Some(tick)
    }
}
