//! Built-in shader presets.
//!
//! Every preset is a GLSL ES 1.00 fragment shader composed at compile time
//! from a shared header, the shared gradient-noise fragment (when the effect
//! needs it) and the preset body. All presets run against the same
//! full-screen vertex shader in [`crate::render::fullscreen`].
//!
//! The uniform contract is `time: float` and `resolution: vec2`, plus
//! `noiseFactor`/`timeSpeed` and any preset-specific extras. A preset may
//! leave a contract uniform out; its location then resolves to "not found"
//! and writes to it are dropped.

use crate::error::DeckError;
use serde::Serialize;
use serde_json::{json, Value};

/// Elapsed time in seconds.
pub const UNIFORM_TIME: &str = "time";
/// Canvas size in pixels.
pub const UNIFORM_RESOLUTION: &str = "resolution";
/// Spatial frequency of the noise lookups.
pub const UNIFORM_NOISE_FACTOR: &str = "noiseFactor";
/// Multiplier applied to `time` inside the effect.
pub const UNIFORM_TIME_SPEED: &str = "timeSpeed";

/// Key of the preset selected when nothing else is requested.
pub const DEFAULT_PRESET: &str = "noise";

macro_rules! fragment_header {
    () => {
        "precision mediump float;\nuniform float time;\nuniform vec2 resolution;\n"
    };
}

// Simplex-style 2D gradient noise, shared by every noise-driven preset.
macro_rules! noise_glsl {
    () => {
        r#"
vec2 hash(vec2 p) {
    p = vec2(dot(p, vec2(127.1, 311.7)),
             dot(p, vec2(269.5, 183.3)));
    return -1.0 + 2.0 * fract(sin(p) * 43758.5453123);
}

float noise(in vec2 p) {
    const float K1 = 0.366025404;
    const float K2 = 0.211324865;
    vec2 i = floor(p + (p.x + p.y) * K1);
    vec2 a = p - i + (i.x + i.y) * K2;
    vec2 o = (a.x > a.y) ? vec2(1.0, 0.0) : vec2(0.0, 1.0);
    vec2 b = a - o + K2;
    vec2 c = a - 1.0 + 2.0 * K2;
    vec3 h = max(0.5 - vec3(dot(a, a), dot(b, b), dot(c, c)), 0.0);
    vec3 n = h * h * h * h * vec3(dot(a, hash(i + 0.0)), dot(b, hash(i + o)), dot(c, hash(i + 1.0)));
    return dot(n, vec3(70.0));
}
"#
    };
}

/// The shared gradient-noise GLSL fragment (`hash` + `noise`).
pub const NOISE_GLSL: &str = noise_glsl!();

const NOISE_FRAG: &str = concat!(
    fragment_header!(),
    "uniform float noiseFactor;\nuniform float timeSpeed;\n",
    noise_glsl!(),
    r#"
void main(void) {
    vec2 uv = gl_FragCoord.xy / resolution;
    float n = noise(uv * noiseFactor + time * timeSpeed * 0.1);
    gl_FragColor = vec4(vec3(n), 1.0);
}
"#
);

const SWIRL_FRAG: &str = concat!(
    fragment_header!(),
    "uniform float noiseFactor;\nuniform float timeSpeed;\nuniform float swirlStrength;\n",
    noise_glsl!(),
    r#"
void main(void) {
    vec2 uv = gl_FragCoord.xy / resolution;
    vec2 p = uv - 0.5;
    float r = length(p);
    float angle = atan(p.y, p.x) + swirlStrength * r - time * timeSpeed;
    vec2 q = vec2(cos(angle), sin(angle)) * r;
    float n = noise(q * noiseFactor);
    gl_FragColor = vec4(0.5 + 0.5 * n, 0.3 + 0.5 * r, 0.8 - 0.5 * n, 1.0);
}
"#
);

const RIPPLE_FRAG: &str = concat!(
    fragment_header!(),
    "uniform float noiseFactor;\nuniform float timeSpeed;\nuniform float rippleFrequency;\n",
    noise_glsl!(),
    r#"
void main(void) {
    vec2 uv = gl_FragCoord.xy / resolution;
    float d = distance(uv, vec2(0.5));
    float wave = sin(d * rippleFrequency - time * timeSpeed * 4.0);
    float n = noise(uv * noiseFactor + time * timeSpeed * 0.1);
    float v = 0.5 + 0.5 * wave + 0.1 * n;
    gl_FragColor = vec4(vec3(0.1, 0.4, 0.7) * v + vec3(0.0, 0.1, 0.2), 1.0);
}
"#
);

const FIRE_FRAG: &str = concat!(
    fragment_header!(),
    "uniform float noiseFactor;\nuniform float timeSpeed;\nuniform float fireIntensity;\n",
    noise_glsl!(),
    r#"
void main(void) {
    vec2 uv = gl_FragCoord.xy / resolution;
    vec2 p = vec2(uv.x * noiseFactor, uv.y * noiseFactor - time * timeSpeed);
    float n = 0.5 * noise(p) + 0.25 * noise(p * 2.0) + 0.5;
    float heat = clamp(n * (1.0 - uv.y) * fireIntensity, 0.0, 1.0);
    gl_FragColor = vec4(heat, heat * heat, heat * heat * heat * 0.5, 1.0);
}
"#
);

const GRADIENT_FRAG: &str = concat!(
    fragment_header!(),
    "uniform float noiseFactor;\nuniform float timeSpeed;\n",
    noise_glsl!(),
    r#"
void main(void) {
    vec2 uv = gl_FragCoord.xy / resolution;
    float m = 0.5 + 0.5 * sin(time * timeSpeed);
    vec3 warm = vec3(0.95, 0.45, 0.3);
    vec3 cool = vec3(0.2, 0.4, 0.9);
    float grain = 0.05 * noise(uv * noiseFactor);
    vec3 color = mix(warm, cool, m) + (uv.y - 0.5) * 0.2 + grain;
    gl_FragColor = vec4(color, 1.0);
}
"#
);

// No noise lookups, so no noiseFactor either.
const CHECKERBOARD_FRAG: &str = concat!(
    fragment_header!(),
    "uniform float timeSpeed;\nuniform float checkerboardSize;\n",
    r#"
void main(void) {
    vec2 uv = gl_FragCoord.xy / resolution;
    vec2 cell = floor(uv * checkerboardSize);
    float pattern = mod(cell.x + cell.y, 2.0);
    float pulse = 0.85 + 0.15 * sin(time * timeSpeed);
    vec3 color = mix(vec3(0.1), vec3(0.9), pattern) * pulse;
    gl_FragColor = vec4(color, 1.0);
}
"#
);

/// A preset-specific float uniform exposed as a control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtraParam {
    /// Uniform name in the fragment shader.
    pub uniform: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Value used until the control is set.
    pub default: f32,
    /// Lower end of the suggested range.
    pub min: f32,
    /// Upper end of the suggested range.
    pub max: f32,
}

/// A named fragment shader plus the extra controls it reads.
#[derive(Debug, PartialEq)]
pub struct Preset {
    /// Selector key (e.g. `"swirl"`).
    pub key: &'static str,
    /// Human-readable name.
    pub label: &'static str,
    /// Complete fragment shader source.
    pub fragment: &'static str,
    /// Preset-specific uniforms beyond the shared contract.
    pub extras: &'static [ExtraParam],
}

impl Preset {
    /// Whether the fragment source declares `uniform <type> name;`.
    pub fn declares_uniform(&self, name: &str) -> bool {
        declared_uniforms(self.fragment).any(|declared| declared == name)
    }

    /// Whether the preset composes in the shared noise fragment.
    pub fn uses_noise(&self) -> bool {
        self.fragment.contains(NOISE_GLSL)
    }

    /// Looks up an extra by uniform name.
    pub fn extra(&self, uniform: &str) -> Option<&'static ExtraParam> {
        self.extras.iter().find(|extra| extra.uniform == uniform)
    }
}

/// All presets in selector order.
pub static PRESETS: [Preset; 6] = [
    Preset {
        key: "noise",
        label: "Noise",
        fragment: NOISE_FRAG,
        extras: &[],
    },
    Preset {
        key: "swirl",
        label: "Swirl",
        fragment: SWIRL_FRAG,
        extras: &[ExtraParam {
            uniform: "swirlStrength",
            label: "Swirl strength",
            default: 6.0,
            min: 0.0,
            max: 20.0,
        }],
    },
    Preset {
        key: "ripple",
        label: "Ripple",
        fragment: RIPPLE_FRAG,
        extras: &[ExtraParam {
            uniform: "rippleFrequency",
            label: "Ripple frequency",
            default: 40.0,
            min: 5.0,
            max: 100.0,
        }],
    },
    Preset {
        key: "fire",
        label: "Fire",
        fragment: FIRE_FRAG,
        extras: &[ExtraParam {
            uniform: "fireIntensity",
            label: "Fire intensity",
            default: 1.5,
            min: 0.5,
            max: 4.0,
        }],
    },
    Preset {
        key: "gradient",
        label: "Gradient",
        fragment: GRADIENT_FRAG,
        extras: &[],
    },
    Preset {
        key: "checkerboard",
        label: "Checkerboard",
        fragment: CHECKERBOARD_FRAG,
        extras: &[ExtraParam {
            uniform: "checkerboardSize",
            label: "Checkerboard size",
            default: 8.0,
            min: 2.0,
            max: 32.0,
        }],
    },
];

/// Finds a preset by key.
pub fn find(key: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.key == key)
}

/// Finds a preset by key, reporting unknown keys as [`DeckError::UnknownPreset`].
pub fn lookup(key: &str) -> Result<&'static Preset, DeckError> {
    find(key).ok_or_else(|| DeckError::UnknownPreset(key.to_string()))
}

/// Returns all preset keys in selector order.
pub fn list_keys() -> Vec<&'static str> {
    PRESETS.iter().map(|preset| preset.key).collect()
}

/// Describes every preset for a selector UI: key, label and extras, in
/// selector order. Shader sources are left out.
pub fn catalog() -> Value {
    PRESETS
        .iter()
        .map(|preset| json!({"key": preset.key, "label": preset.label, "extras": preset.extras}))
        .collect()
}

/// Yields the names of top-level `uniform` declarations in a GLSL source.
pub fn declared_uniforms(source: &str) -> impl Iterator<Item = &str> {
    source.lines().filter_map(|line| {
        let decl = line.trim().strip_prefix("uniform ")?.strip_suffix(';')?;
        decl.split_whitespace().last()
    })
}
