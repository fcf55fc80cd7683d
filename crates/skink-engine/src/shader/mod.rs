//! Shader compilation.
//!
//! WGSL is parsed and validated with naga before any GPU object exists, so a
//! broken shader is reported with its diagnostic instead of surfacing later as
//! a device validation panic. `ShaderProgram::link` then checks that the two
//! stages agree on their interface.

mod compiler;
mod program;

use std::borrow::Cow;

use anyhow::Result;

pub use compiler::{compile, CompiledShader, ShaderSource, ShaderStage};
pub use program::ShaderProgram;

/// Passes `@location(0)` positions through as clip-space coordinates.
pub const QUAD_VERTEX: ShaderSource = ShaderSource {
    label: "skink quad vertex shader",
    stage: ShaderStage::Vertex,
    wgsl: Cow::Borrowed(include_str!("quad_vertex.wgsl")),
    entry_point: "vs_main",
};

/// Fills with a constant blue.
pub const QUAD_FRAGMENT: ShaderSource = ShaderSource {
    label: "skink quad fragment shader",
    stage: ShaderStage::Fragment,
    wgsl: Cow::Borrowed(include_str!("quad_fragment.wgsl")),
    entry_point: "fs_main",
};

/// Compiles and links the built-in quad shader pair.
pub fn quad_program() -> Result<ShaderProgram> {
    let vertex = compile(&QUAD_VERTEX)?;
    let fragment = compile(&QUAD_FRAGMENT)?;
    ShaderProgram::link(vertex, fragment)
}
