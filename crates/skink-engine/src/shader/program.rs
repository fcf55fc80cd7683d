use anyhow::{bail, Result};

use super::compiler::{CompiledShader, ShaderStage};

/// A vertex + fragment pair whose stage interfaces agree.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    vertex: CompiledShader,
    fragment: CompiledShader,
}

impl ShaderProgram {
    /// Pairs two compiled shaders.
    ///
    /// Fails when the stages are wrong or the fragment stage reads a location
    /// the vertex stage never writes.
    pub fn link(vertex: CompiledShader, fragment: CompiledShader) -> Result<Self> {
        if vertex.stage() != ShaderStage::Vertex {
            bail!("failed to link shader program: `{}` is not a vertex shader", vertex.label());
        }
        if fragment.stage() != ShaderStage::Fragment {
            bail!("failed to link shader program: `{}` is not a fragment shader", fragment.label());
        }

        let missing: Vec<u32> = fragment
            .input_locations()
            .iter()
            .copied()
            .filter(|loc| !vertex.output_locations().contains(loc))
            .collect();

        if !missing.is_empty() {
            bail!(
                "failed to link shader program: `{}` reads location(s) {:?} not written by `{}`",
                fragment.label(),
                missing,
                vertex.label()
            );
        }

        Ok(Self { vertex, fragment })
    }

    pub fn vertex(&self) -> &CompiledShader {
        &self.vertex
    }

    pub fn fragment(&self) -> &CompiledShader {
        &self.fragment
    }
}
