//! Browser host for shaderdeck.
//!
//! `WebDeck` binds a canvas' WebGL2 context through `glow`, owns the
//! [`Deck`](shaderdeck_core::Deck), and drives it from
//! `requestAnimationFrame`. Page markup and input wiring stay in JavaScript:
//! the page calls `select_preset`, `set_control` and `randomize` from its
//! own event handlers.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Element id looked up by `WebDeck::attach`.
pub const DEFAULT_CANVAS_ID: &str = "shader-canvas";

/// The preset catalog as a JSON string, for populating a selector.
pub fn presets_json() -> String {
    shaderdeck_core::preset::catalog().to_string()
}

/// Control texts after a randomize: noise factor first, then time speed.
pub fn randomized_texts(draw: &shaderdeck_core::RandomizedControls) -> [String; 2] {
    [
        format!("{:.1}", draw.noise_factor),
        format!("{:.1}", draw.time_speed),
    ]
}
