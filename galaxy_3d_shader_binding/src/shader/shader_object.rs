/// Shader object - compiled programs and binding tables of one pass
///
/// Compiles (or shares) the program of each stage, builds the per-stage
/// binding tables from reflection, and drives them at draw time.

use std::sync::Arc;

use crate::compiler::diagnostics::report_compile_diagnostics;
use crate::compiler::{CompileRequest, ShaderCompiler};
use crate::config::BindingConfig;
use crate::device::{
    DeviceContext, GraphicsDevice, Program, ProgramDesc, ShaderStage, StreamOutputDecl,
    UnorderedAccessSlot,
};
use crate::effect::{Effect, ParameterSource, ShaderDescKey};
use crate::error::{Error, Result};
use crate::shader::{
    compile_macros, generate_shader_text, input_signature_hash, resolve_profile,
    BindingTable, ShaderDesc, TechPass,
};
use crate::{engine_debug, engine_error, engine_warn};

const SOURCE: &str = "galaxy3d::ShaderObject";

/// Compiled state of one pass
pub struct ShaderObject {
    programs: [Option<Arc<dyn Program>>; ShaderStage::COUNT],
    stage_valid: [bool; ShaderStage::COUNT],
    valid: bool,
    tables: [BindingTable; ShaderStage::COUNT],
    vs_code: Option<Arc<[u8]>>,
    vs_signature: u64,
}

impl ShaderObject {
    /// Object with no stage (valid, binds nothing)
    pub fn new() -> Self {
        Self {
            programs: Default::default(),
            stage_valid: [true; ShaderStage::COUNT],
            valid: true,
            tables: ShaderStage::ALL.map(BindingTable::new),
            vs_code: None,
            vs_signature: 0,
        }
    }

    /// Compile the stages described by `shader_descs` for pass `tech_pass` of `effect`
    ///
    /// A description already compiled by another pass is shared from that
    /// pass's object instead of being compiled again. Compile failures and
    /// unsupported stages only clear the stage's validity; GPU buffer creation
    /// failures and binding mismatches are errors.
    pub fn compile(
        effect: &Effect,
        shader_descs: &[Option<ShaderDescKey>; ShaderStage::COUNT],
        tech_pass: TechPass,
        device: &mut dyn GraphicsDevice,
        compiler: &dyn ShaderCompiler,
        config: &BindingConfig,
    ) -> Result<Self> {
        let mut object = Self::new();

        for stage in ShaderStage::ALL {
            let Some(key) = shader_descs[stage.index()] else { continue };
            let Some(desc) = effect.shader_desc(key) else {
                let message = format!(
                    "Pass {}.{}: unknown shader description for the {} stage",
                    tech_pass.technique, tech_pass.pass, stage.name()
                );
                engine_error!(SOURCE, "{}", message);
                return Err(Error::InvalidResource(message));
            };

            let shared = desc
                .tech_pass
                .and_then(|tp| effect.shader_object(tp.technique, tp.pass));

            match shared {
                Some(other) => object.share_stage(stage, desc, other, effect, device, config)?,
                None if !desc.is_empty() => {
                    object.compile_stage(stage, desc, effect, device, compiler, config)?
                }
                None => {}
            }

            object.valid &= object.stage_valid[stage.index()];
        }

        Ok(object)
    }

    /// Take the compiled state of `stage` from `other`
    fn share_stage(
        &mut self,
        stage: ShaderStage,
        desc: &ShaderDesc,
        other: &ShaderObject,
        parameters: &dyn ParameterSource,
        device: &mut dyn GraphicsDevice,
        config: &BindingConfig,
    ) -> Result<()> {
        let s = stage.index();
        self.stage_valid[s] = other.stage_valid[s];
        self.programs[s] = other.programs[s].clone();

        if stage == ShaderStage::Vertex {
            self.vs_code = other.vs_code.clone();
            self.vs_signature = other.vs_signature;
            if !desc.stream_output.is_empty() {
                let g = ShaderStage::Geometry.index();
                self.programs[g] = other.programs[g].clone();
            }
        }

        self.tables[s] = other.tables[s].rebind(parameters, device, config)?;
        engine_debug!(SOURCE, "Shared {} stage '{}'", stage.name(), desc.func_name);
        Ok(())
    }

    /// Compile, create the program of, and reflect one stage
    fn compile_stage(
        &mut self,
        stage: ShaderStage,
        desc: &ShaderDesc,
        effect: &Effect,
        device: &mut dyn GraphicsDevice,
        compiler: &dyn ShaderCompiler,
        config: &BindingConfig,
    ) -> Result<()> {
        let s = stage.index();
        let caps = device.caps().clone();

        // ========== VALIDATION ==========
        let Some(profile) = resolve_profile(stage, &desc.profile, &caps) else {
            engine_warn!(SOURCE,
                "{} stage '{}' ({}) not supported at feature level {:?}",
                stage.name(), desc.func_name, desc.profile, caps.feature_level);
            self.stage_valid[s] = false;
            return Ok(());
        };

        // ========== COMPILATION ==========
        let source = generate_shader_text(effect, stage, &caps);
        let macros = compile_macros(&caps, config);
        let output = compiler.compile(&CompileRequest {
            source: &source,
            entry_point: &desc.func_name,
            profile: &profile,
            macros: &macros,
        });

        if let Some(diagnostics) = &output.diagnostics {
            report_compile_diagnostics(
                &source,
                &desc.func_name,
                &profile,
                diagnostics,
                output.bytecode.is_none(),
                config.diagnostic_context_lines,
            );
        }

        let Some(bytecode) = output.bytecode else {
            self.stage_valid[s] = false;
            return Ok(());
        };
        let bytecode: Arc<[u8]> = Arc::from(bytecode);

        // ========== PROGRAMS ==========
        self.stage_valid[s] = self.create_programs(stage, desc, &bytecode, device);
        if stage == ShaderStage::Vertex {
            self.vs_code = Some(bytecode.clone());
        }

        // ========== REFLECTION ==========
        match compiler.reflect(&bytecode) {
            Ok(reflection) => {
                self.tables[s] = BindingTable::build(stage, &reflection, effect, device, config)?;
                if stage == ShaderStage::Vertex {
                    self.vs_signature = input_signature_hash(&reflection.input_parameters);
                }
            }
            Err(e) => {
                engine_warn!(SOURCE, "{} stage '{}': {}", stage.name(), desc.func_name, e);
                self.stage_valid[s] = false;
            }
        }

        Ok(())
    }

    /// Create the program objects of a compiled stage; false if any creation failed
    fn create_programs(
        &mut self,
        stage: ShaderStage,
        desc: &ShaderDesc,
        bytecode: &[u8],
        device: &mut dyn GraphicsDevice,
    ) -> bool {
        let mut create = |program_stage: ShaderStage, stream_output: &[StreamOutputDecl]| {
            device
                .create_program(ProgramDesc { stage: program_stage, bytecode, stream_output })
                .map_err(|e| {
                    engine_warn!(SOURCE, "{} program for '{}': {}",
                        program_stage.name(), desc.func_name, e);
                })
                .ok()
        };

        let no_stream_output: &[StreamOutputDecl] = &[];
        match stage {
            ShaderStage::Vertex => {
                let Some(vertex) = create(ShaderStage::Vertex, no_stream_output) else { return false };
                self.programs[stage.index()] = Some(vertex);
                if desc.stream_output.is_empty() {
                    return true;
                }
                // Stream output without a geometry stage of its own
                let Some(geometry) = create(ShaderStage::Geometry, desc.stream_output.as_slice()) else { return false };
                self.programs[ShaderStage::Geometry.index()] = Some(geometry);
                true
            }
            _ => {
                let Some(program) = create(stage, desc.stream_output.as_slice()) else { return false };
                self.programs[stage.index()] = Some(program);
                true
            }
        }
    }

    /// Copy of this object for another effect instance
    ///
    /// Programs are shared; constant buffers, slots and bindings are not.
    pub fn clone_for(
        &self,
        parameters: &dyn ParameterSource,
        device: &mut dyn GraphicsDevice,
        config: &BindingConfig,
    ) -> Result<Self> {
        let mut tables = Vec::with_capacity(ShaderStage::COUNT);
        for table in &self.tables {
            tables.push(table.rebind(parameters, device, config)?);
        }
        let tables: [BindingTable; ShaderStage::COUNT] = tables
            .try_into()
            .map_err(|_| Error::InvalidResource("binding table count".to_string()))?;

        Ok(Self {
            programs: self.programs.clone(),
            stage_valid: self.stage_valid,
            valid: self.valid,
            tables,
            vs_code: self.vs_code.clone(),
            vs_signature: self.vs_signature,
        })
    }

    /// Attach programs, write parameters, upload dirty buffers and attach slots
    ///
    /// Read-write views of the compute stage are attached last.
    pub fn bind(&mut self, context: &mut dyn DeviceContext) -> Result<()> {
        for stage in ShaderStage::ALL {
            context.set_program(stage, self.programs[stage.index()].as_ref())?;
        }

        for table in &mut self.tables {
            table.apply();
        }
        for table in &mut self.tables {
            table.upload()?;
        }

        for table in &self.tables {
            let stage = table.stage();
            if !table.shader_resources().is_empty() {
                context.set_shader_resources(stage, table.shader_resources())?;
            }
            if !table.samplers().is_empty() {
                context.set_samplers(stage, table.samplers())?;
            }
            if !table.constant_buffers().is_empty() {
                context.set_constant_buffers(stage, table.constant_buffers().gpu_buffers())?;
            }
        }

        let compute = &self.tables[ShaderStage::Compute.index()];
        if !compute.unordered_access_views().is_empty() {
            context.set_compute_unordered_access_views(compute.unordered_access_views())?;
        }

        Ok(())
    }

    /// Detach the compute stage's read-write views
    pub fn unbind(&mut self, context: &mut dyn DeviceContext) -> Result<()> {
        let count = self.tables[ShaderStage::Compute.index()].unordered_access_views().len();
        if count > 0 {
            let cleared: Vec<UnorderedAccessSlot> = vec![None; count];
            context.set_compute_unordered_access_views(&cleared)?;
        }
        Ok(())
    }

    /// True if every stage is valid
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_stage_valid(&self, stage: ShaderStage) -> bool {
        self.stage_valid[stage.index()]
    }

    pub fn program(&self, stage: ShaderStage) -> Option<&Arc<dyn Program>> {
        self.programs[stage.index()].as_ref()
    }

    pub fn binding_table(&self, stage: ShaderStage) -> &BindingTable {
        &self.tables[stage.index()]
    }

    /// Vertex stage bytecode (input layout creation)
    pub fn vertex_bytecode(&self) -> Option<&[u8]> {
        self.vs_code.as_deref()
    }

    /// Hash of the vertex input signature (0 without a vertex stage)
    pub fn vs_signature(&self) -> u64 {
        self.vs_signature
    }
}

impl Default for ShaderObject {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "shader_object_tests.rs"]
mod tests;
