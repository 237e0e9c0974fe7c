/// Effect, techniques and passes

use std::sync::Arc;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::compiler::{ShaderCompiler, ShaderMacro};
use crate::config::BindingConfig;
use crate::device::{GraphicsDevice, ShaderStage};
use crate::effect::{EffectParameter, ParameterSource};
use crate::error::{Error, Result};
use crate::shader::{ShaderDesc, ShaderObject, TechPass};
use crate::{engine_bail, engine_info, engine_warn};

new_key_type! {
    /// Stable key of a shader description inside its effect
    pub struct ShaderDescKey;
}

/// Named group of parameters emitted as one `cbuffer` block
#[derive(Debug, Clone)]
pub struct ConstantBufferGroup {
    pub name: String,
    /// Indices into the effect's parameter list
    pub parameters: Vec<usize>,
}

/// Piece of shader source
#[derive(Debug, Clone)]
pub struct ShaderFragment {
    /// Stage the fragment is restricted to (`None` = every stage)
    pub stage: Option<ShaderStage>,
    /// Fragment is dropped on devices below this shader model
    pub min_shader_model: u32,
    pub source: String,
}

impl ShaderFragment {
    /// Fragment included for every stage
    pub fn common(source: &str) -> Self {
        Self { stage: None, min_shader_model: 0, source: source.to_string() }
    }

    /// Fragment included only when compiling `stage`
    pub fn for_stage(stage: ShaderStage, source: &str) -> Self {
        Self { stage: Some(stage), min_shader_model: 0, source: source.to_string() }
    }

    pub fn with_min_shader_model(mut self, min_shader_model: u32) -> Self {
        self.min_shader_model = min_shader_model;
        self
    }
}

/// Pass creation info
#[derive(Debug, Clone)]
pub struct PassDesc {
    pub name: String,
    pub shader_descs: [Option<ShaderDescKey>; ShaderStage::COUNT],
}

impl PassDesc {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), shader_descs: [None; ShaderStage::COUNT] }
    }

    pub fn with_shader(mut self, stage: ShaderStage, key: ShaderDescKey) -> Self {
        self.shader_descs[stage.index()] = Some(key);
        self
    }
}

/// Pass of a technique
pub struct Pass {
    name: String,
    shader_descs: [Option<ShaderDescKey>; ShaderStage::COUNT],
    shader_object: Option<ShaderObject>,
}

impl Pass {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shader_descs(&self) -> &[Option<ShaderDescKey>; ShaderStage::COUNT] {
        &self.shader_descs
    }

    /// Compiled state, once the pass has been compiled
    pub fn shader_object(&self) -> Option<&ShaderObject> {
        self.shader_object.as_ref()
    }

    pub fn shader_object_mut(&mut self) -> Option<&mut ShaderObject> {
        self.shader_object.as_mut()
    }
}

/// Technique (list of passes)
pub struct Technique {
    name: String,
    passes: Vec<Pass>,
}

impl Technique {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn pass(&self, index: u32) -> Option<&Pass> {
        self.passes.get(index as usize)
    }
}

/// Effect
pub struct Effect {
    name: String,
    macros: Vec<ShaderMacro>,
    constant_buffers: Vec<ConstantBufferGroup>,
    parameters: Vec<Arc<EffectParameter>>,
    parameter_names: FxHashMap<String, usize>,
    fragments: Vec<ShaderFragment>,
    shader_descs: SlotMap<ShaderDescKey, ShaderDesc>,
    techniques: Vec<Technique>,
}

impl Effect {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            macros: Vec::new(),
            constant_buffers: Vec::new(),
            parameters: Vec::new(),
            parameter_names: FxHashMap::default(),
            fragments: Vec::new(),
            shader_descs: SlotMap::with_key(),
            techniques: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ===== MACROS =====

    /// Add a `#define` emitted at the top of every generated source
    pub fn add_macro(&mut self, name: &str, value: &str) {
        self.macros.push(ShaderMacro::new(name, value));
    }

    pub fn macros(&self) -> &[ShaderMacro] {
        &self.macros
    }

    // ===== PARAMETERS =====

    /// Add a parameter; names are unique
    pub fn add_parameter(&mut self, parameter: EffectParameter) -> Result<usize> {
        if self.parameter_names.contains_key(parameter.name()) {
            engine_bail!("galaxy3d::Effect",
                "Effect '{}': parameter '{}' already exists", self.name, parameter.name());
        }

        let index = self.parameters.len();
        self.parameter_names.insert(parameter.name().to_string(), index);
        self.parameters.push(Arc::new(parameter));
        Ok(index)
    }

    pub fn parameters(&self) -> &[Arc<EffectParameter>] {
        &self.parameters
    }

    pub fn parameter_by_index(&self, index: usize) -> Option<&Arc<EffectParameter>> {
        self.parameters.get(index)
    }

    // ===== CONSTANT BUFFERS =====

    /// Group existing parameters into a named constant buffer
    pub fn add_constant_buffer(&mut self, name: &str, parameter_names: &[&str]) -> Result<usize> {
        let mut parameters = Vec::with_capacity(parameter_names.len());
        for parameter_name in parameter_names {
            match self.parameter_names.get(*parameter_name) {
                Some(&index) => parameters.push(index),
                None => {
                    engine_bail!("galaxy3d::Effect",
                        "Effect '{}': constant buffer '{}' references unknown parameter '{}'",
                        self.name, name, parameter_name);
                }
            }
        }

        self.constant_buffers.push(ConstantBufferGroup { name: name.to_string(), parameters });
        Ok(self.constant_buffers.len() - 1)
    }

    pub fn constant_buffers(&self) -> &[ConstantBufferGroup] {
        &self.constant_buffers
    }

    // ===== SHADER SOURCE =====

    pub fn add_shader_fragment(&mut self, fragment: ShaderFragment) {
        self.fragments.push(fragment);
    }

    pub fn shader_fragments(&self) -> &[ShaderFragment] {
        &self.fragments
    }

    pub fn add_shader_desc(&mut self, desc: ShaderDesc) -> ShaderDescKey {
        self.shader_descs.insert(desc)
    }

    pub fn shader_desc(&self, key: ShaderDescKey) -> Option<&ShaderDesc> {
        self.shader_descs.get(key)
    }

    // ===== TECHNIQUES =====

    /// Add a technique; returns its index
    pub fn add_technique(&mut self, name: &str, passes: Vec<PassDesc>) -> u32 {
        let passes = passes
            .into_iter()
            .map(|p| Pass { name: p.name, shader_descs: p.shader_descs, shader_object: None })
            .collect();
        self.techniques.push(Technique { name: name.to_string(), passes });
        (self.techniques.len() - 1) as u32
    }

    pub fn techniques(&self) -> &[Technique] {
        &self.techniques
    }

    pub fn technique_by_name(&self, name: &str) -> Option<u32> {
        self.techniques.iter().position(|t| t.name == name).map(|i| i as u32)
    }

    fn pass(&self, technique: u32, pass: u32) -> Option<&Pass> {
        self.techniques.get(technique as usize)?.pass(pass)
    }

    /// Compiled state of a pass
    pub fn shader_object(&self, technique: u32, pass: u32) -> Option<&ShaderObject> {
        self.pass(technique, pass)?.shader_object()
    }

    /// Compiled state of a pass, for binding
    pub fn shader_object_mut(&mut self, technique: u32, pass: u32) -> Option<&mut ShaderObject> {
        self.techniques
            .get_mut(technique as usize)?
            .passes
            .get_mut(pass as usize)?
            .shader_object_mut()
    }

    // ===== COMPILATION =====

    /// Compile one pass and store its shader object
    ///
    /// Descriptions compiled here for the first time remember this pass, so
    /// later passes using them share the result. Returns the object's validity.
    pub fn compile_pass(
        &mut self,
        technique: u32,
        pass: u32,
        device: &mut dyn GraphicsDevice,
        compiler: &dyn ShaderCompiler,
        config: &BindingConfig,
    ) -> Result<bool> {
        let Some(shader_descs) = self.pass(technique, pass).map(|p| p.shader_descs) else {
            let message = format!("Effect '{}': no pass {}.{}", self.name, technique, pass);
            return Err(Error::InvalidResource(message));
        };

        let tech_pass = TechPass::new(technique, pass);
        let object = ShaderObject::compile(self, &shader_descs, tech_pass, device, compiler, config)?;
        let valid = object.is_valid();

        for key in shader_descs.iter().flatten() {
            if let Some(desc) = self.shader_descs.get_mut(*key) {
                if desc.tech_pass.is_none() && !desc.is_empty() {
                    desc.tech_pass = Some(tech_pass);
                }
            }
        }

        if !valid {
            engine_warn!("galaxy3d::Effect", "Effect '{}': pass {}.{} is invalid",
                self.name, technique, pass);
        }

        self.techniques[technique as usize].passes[pass as usize].shader_object = Some(object);
        Ok(valid)
    }

    /// Compile every pass of every technique, in order
    ///
    /// Returns the number of valid passes.
    pub fn compile_all(
        &mut self,
        device: &mut dyn GraphicsDevice,
        compiler: &dyn ShaderCompiler,
        config: &BindingConfig,
    ) -> Result<usize> {
        let mut valid = 0;
        for technique in 0..self.techniques.len() {
            for pass in 0..self.techniques[technique].passes.len() {
                if self.compile_pass(technique as u32, pass as u32, device, compiler, config)? {
                    valid += 1;
                }
            }
        }
        engine_info!("galaxy3d::Effect", "Effect '{}' compiled: {} valid passes", self.name, valid);
        Ok(valid)
    }

    /// New instance of this effect with its own parameters
    ///
    /// Parameter values are copied. Compiled programs are shared with this
    /// instance; constant buffers and bindings are not.
    pub fn clone_instance(
        &self,
        device: &mut dyn GraphicsDevice,
        config: &BindingConfig,
    ) -> Result<Effect> {
        let mut instance = Effect {
            name: self.name.clone(),
            macros: self.macros.clone(),
            constant_buffers: self.constant_buffers.clone(),
            parameters: self.parameters.iter().map(|p| Arc::new(p.duplicate())).collect(),
            parameter_names: self.parameter_names.clone(),
            fragments: self.fragments.clone(),
            shader_descs: self.shader_descs.clone(),
            techniques: Vec::with_capacity(self.techniques.len()),
        };

        let mut objects = Vec::new();
        for technique in &self.techniques {
            let mut passes = Vec::with_capacity(technique.passes.len());
            for pass in &technique.passes {
                passes.push(Pass { name: pass.name.clone(), shader_descs: pass.shader_descs, shader_object: None });
                objects.push(match &pass.shader_object {
                    Some(object) => Some(object.clone_for(&instance, device, config)?),
                    None => None,
                });
            }
            instance.techniques.push(Technique { name: technique.name.clone(), passes });
        }

        let mut objects = objects.into_iter();
        for technique in &mut instance.techniques {
            for pass in &mut technique.passes {
                pass.shader_object = objects.next().flatten();
            }
        }

        Ok(instance)
    }
}

impl ParameterSource for Effect {
    fn parameter_by_name(&self, name: &str) -> Option<&Arc<EffectParameter>> {
        self.parameter_names.get(name).and_then(|&i| self.parameters.get(i))
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
