//! CPU mirror of the preset fragment shaders.
//!
//! Each function evaluates the same math as the GLSL in [`crate::preset`]
//! for one fragment, using `glam` in place of GLSL vector types. The GPU
//! runs at `mediump` precision, so results agree in shape rather than bit
//! for bit. Used for previews and for checking pattern properties without
//! a GL context.

use crate::preset::Preset;
use crate::render::FrameUniforms;
use glam::{Vec2, Vec3};

/// GLSL `fract`: `x - floor(x)`, always in [0, 1).
fn fract(v: Vec2) -> Vec2 {
    v - v.floor()
}

/// GLSL `mod` for floats: result has the sign of `y`.
fn gl_mod(x: f32, y: f32) -> f32 {
    x - y * (x / y).floor()
}

fn hash(p: Vec2) -> Vec2 {
    let p = Vec2::new(
        p.dot(Vec2::new(127.1, 311.7)),
        p.dot(Vec2::new(269.5, 183.3)),
    );
    let s = Vec2::new(p.x.sin(), p.y.sin()) * 43758.547;
    Vec2::splat(-1.0) + 2.0 * fract(s)
}

/// The shared 2D gradient noise. Roughly in [-1, 1].
pub fn noise(p: Vec2) -> f32 {
    const K1: f32 = 0.366_025_4;
    const K2: f32 = 0.211_324_87;

    let i = (p + Vec2::splat((p.x + p.y) * K1)).floor();
    let a = p - i + Vec2::splat((i.x + i.y) * K2);
    let o = if a.x > a.y { Vec2::X } else { Vec2::Y };
    let b = a - o + Vec2::splat(K2);
    let c = a - Vec2::splat(1.0 - 2.0 * K2);
    let h = (Vec3::splat(0.5) - Vec3::new(a.dot(a), b.dot(b), c.dot(c))).max(Vec3::ZERO);
    let n = h * h * h * h * Vec3::new(a.dot(hash(i)), b.dot(hash(i + o)), c.dot(hash(i + Vec2::ONE)));
    n.dot(Vec3::splat(70.0))
}

/// Mix factor of the gradient preset between its warm and cool colors.
pub fn gradient_mix(time: f32, time_speed: f32) -> f32 {
    0.5 + 0.5 * (time * time_speed).sin()
}

/// Checkerboard cell parity at `uv`: 0 or 1.
pub fn checker(uv: Vec2, size: f32) -> f32 {
    let cell = (uv * size).floor();
    gl_mod(cell.x + cell.y, 2.0)
}

/// Evaluates `preset` at `frag_coord` (pixel centre, bottom-left origin).
///
/// Extras missing from `u` read as 0, the value GL gives a uniform that
/// was never written. Returns `None` for presets without a CPU mirror.
pub fn shade(preset: &Preset, frag_coord: Vec2, u: &FrameUniforms) -> Option<Vec3> {
    let resolution = Vec2::from(u.resolution);
    let uv = frag_coord / resolution;
    let t = u.time * u.time_speed;
    let extra = |name: &str| u.extra(name).unwrap_or(0.0);

    let color = match preset.key {
        "noise" => {
            let n = noise(uv * u.noise_factor + Vec2::splat(t * 0.1));
            Vec3::splat(n)
        }
        "swirl" => {
            let p = uv - Vec2::splat(0.5);
            let r = p.length();
            let angle = p.y.atan2(p.x) + extra("swirlStrength") * r - t;
            let q = Vec2::new(angle.cos(), angle.sin()) * r;
            let n = noise(q * u.noise_factor);
            Vec3::new(0.5 + 0.5 * n, 0.3 + 0.5 * r, 0.8 - 0.5 * n)
        }
        "ripple" => {
            let d = uv.distance(Vec2::splat(0.5));
            let wave = (d * extra("rippleFrequency") - t * 4.0).sin();
            let n = noise(uv * u.noise_factor + Vec2::splat(t * 0.1));
            let v = 0.5 + 0.5 * wave + 0.1 * n;
            Vec3::new(0.1, 0.4, 0.7) * v + Vec3::new(0.0, 0.1, 0.2)
        }
        "fire" => {
            let p = Vec2::new(uv.x * u.noise_factor, uv.y * u.noise_factor - t);
            let n = 0.5 * noise(p) + 0.25 * noise(p * 2.0) + 0.5;
            let heat = (n * (1.0 - uv.y) * extra("fireIntensity")).clamp(0.0, 1.0);
            Vec3::new(heat, heat * heat, heat * heat * heat * 0.5)
        }
        "gradient" => {
            let m = gradient_mix(u.time, u.time_speed);
            let warm = Vec3::new(0.95, 0.45, 0.3);
            let cool = Vec3::new(0.2, 0.4, 0.9);
            let grain = 0.05 * noise(uv * u.noise_factor);
            warm.lerp(cool, m) + Vec3::splat((uv.y - 0.5) * 0.2 + grain)
        }
        "checkerboard" => {
            let pattern = checker(uv, extra("checkerboardSize"));
            let pulse = 0.85 + 0.15 * t.sin();
            Vec3::splat(0.1).lerp(Vec3::splat(0.9), pattern) * pulse
        }
        _ => return None,
    };
    Some(color)
}
