use std::borrow::Cow;
use std::fmt;

use anyhow::{anyhow, bail, Result};

/// Pipeline stage a shader source is written for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// WGSL source for one stage, plus the entry point to use.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub label: &'static str,
    pub stage: ShaderStage,
    pub wgsl: Cow<'static, str>,
    pub entry_point: &'static str,
}

/// A shader whose WGSL parsed and validated, with its interface locations.
#[derive(Debug, Clone)]
pub struct CompiledShader {
    label: &'static str,
    stage: ShaderStage,
    entry_point: &'static str,
    wgsl: Cow<'static, str>,
    inputs: Vec<u32>,
    outputs: Vec<u32>,
}

impl CompiledShader {
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn entry_point(&self) -> &'static str {
        self.entry_point
    }

    /// User-defined `@location`s read by the entry point, sorted.
    pub fn input_locations(&self) -> &[u32] {
        &self.inputs
    }

    /// User-defined `@location`s written by the entry point, sorted.
    pub fn output_locations(&self) -> &[u32] {
        &self.outputs
    }

    pub(crate) fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.label),
            source: wgpu::ShaderSource::Wgsl(self.wgsl.clone()),
        })
    }
}

/// Parses and validates `source`, and resolves its entry point.
///
/// Errors carry the compiler diagnostic, rendered against the source.
pub fn compile(source: &ShaderSource) -> Result<CompiledShader> {
    let module = naga::front::wgsl::parse_str(&source.wgsl).map_err(|e| {
        anyhow!(
            "failed to compile {} shader `{}`\n{}",
            source.stage,
            source.label,
            e.emit_to_string(&source.wgsl)
        )
    })?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator.validate(&module).map_err(|e| {
        anyhow!(
            "failed to compile {} shader `{}`\n{}",
            source.stage,
            source.label,
            e.emit_to_string(&source.wgsl)
        )
    })?;

    let Some(ep) = module
        .entry_points
        .iter()
        .find(|ep| ep.name == source.entry_point)
    else {
        bail!(
            "failed to compile {} shader `{}`: no entry point named `{}`",
            source.stage,
            source.label,
            source.entry_point
        );
    };

    if ep.stage != source.stage.naga() {
        bail!(
            "failed to compile {} shader `{}`: entry point `{}` is a {:?} entry point",
            source.stage,
            source.label,
            source.entry_point,
            ep.stage
        );
    }

    let mut inputs = Vec::new();
    for arg in &ep.function.arguments {
        collect_locations(&module, arg.ty, arg.binding.as_ref(), &mut inputs);
    }

    let mut outputs = Vec::new();
    if let Some(result) = &ep.function.result {
        collect_locations(&module, result.ty, result.binding.as_ref(), &mut outputs);
    }

    inputs.sort_unstable();
    outputs.sort_unstable();

    log::debug!(
        "compiled {} shader `{}` (inputs {:?}, outputs {:?})",
        source.stage,
        source.label,
        inputs,
        outputs
    );

    Ok(CompiledShader {
        label: source.label,
        stage: source.stage,
        entry_point: source.entry_point,
        wgsl: source.wgsl.clone(),
        inputs,
        outputs,
    })
}

/// Gathers `@location`s from a binding, descending into struct members.
fn collect_locations(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<u32>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => out.push(*location),
        Some(naga::Binding::BuiltIn(_)) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for m in members {
                    collect_locations(module, m.ty, m.binding.as_ref(), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src(stage: ShaderStage, wgsl: &'static str, entry_point: &'static str) -> ShaderSource {
        ShaderSource {
            label: "test",
            stage,
            wgsl: Cow::Borrowed(wgsl),
            entry_point,
        }
    }

    #[test]
    fn valid_vertex_shader_reports_inputs() {
        let s = compile(&src(ShaderStage::Vertex, include_str!("quad_vertex.wgsl"), "vs_main")).unwrap();
        assert_eq!(s.stage(), ShaderStage::Vertex);
        assert_eq!(s.input_locations(), &[0]);
        assert!(s.output_locations().is_empty());
    }

    #[test]
    fn syntax_error_names_stage() {
        let err = compile(&src(ShaderStage::Fragment, "@fragment fn fs_main( {", "fs_main")).unwrap_err();
        assert!(err.to_string().starts_with("failed to compile fragment shader"));
    }

    #[test]
    fn type_error_is_rejected() {
        let wgsl = "@fragment fn fs_main() -> @location(0) vec4<f32> { return 1.0; }";
        assert!(compile(&src(ShaderStage::Fragment, wgsl, "fs_main")).is_err());
    }

    #[test]
    fn missing_entry_point_is_rejected() {
        let err = compile(&src(ShaderStage::Vertex, include_str!("quad_vertex.wgsl"), "main")).unwrap_err();
        assert!(err.to_string().contains("no entry point named `main`"));
    }

    #[test]
    fn stage_mismatch_is_rejected() {
        let err = compile(&src(ShaderStage::Vertex, include_str!("quad_fragment.wgsl"), "fs_main")).unwrap_err();
        assert!(err.to_string().contains("failed to compile vertex shader"));
    }

    #[test]
    fn struct_outputs_are_collected() {
        let wgsl = r#"
            struct Out {
                @builtin(position) pos: vec4<f32>,
                @location(2) uv: vec2<f32>,
                @location(1) tint: vec4<f32>,
            };
            @vertex fn vs_main(@location(0) p: vec2<f32>) -> Out {
                var o: Out;
                o.pos = vec4<f32>(p, 0.0, 1.0);
                o.uv = p;
                o.tint = vec4<f32>(1.0);
                return o;
            }
        "#;
        let s = compile(&src(ShaderStage::Vertex, wgsl, "vs_main")).unwrap();
        assert_eq!(s.output_locations(), &[1, 2]);
    }
}
