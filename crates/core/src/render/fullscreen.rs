//! Full-screen quad shared by every preset.
//!
//! Four clip-space corners drawn as a triangle strip cover the whole
//! viewport. The vertex shader passes positions straight through; the
//! fragment shader derives its coordinates from `gl_FragCoord`.

/// Name of the position attribute in [`VERTEX_SHADER`].
pub const POSITION_ATTRIBUTE: &str = "aVertexPosition";

/// Components per vertex in [`QUAD_VERTICES`].
pub const QUAD_COMPONENTS: i32 = 2;

/// Vertices in [`QUAD_VERTICES`].
pub const QUAD_VERTEX_COUNT: i32 = 4;

/// Top-left, top-right, bottom-left, bottom-right.
pub const QUAD_VERTICES: [f32; 8] = [
    -1.0, 1.0, //
    1.0, 1.0, //
    -1.0, -1.0, //
    1.0, -1.0,
];

/// GLSL ES 1.00 pass-through vertex shader.
///
/// The 2-component buffer feeds a `vec4` attribute; GL fills `z = 0`
/// and `w = 1`.
pub const VERTEX_SHADER: &str = r#"attribute vec4 aVertexPosition;
void main(void) {
    gl_Position = aVertexPosition;
}
"#;
