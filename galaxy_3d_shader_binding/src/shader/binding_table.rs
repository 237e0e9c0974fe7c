/// Per-stage binding table
///
/// Built once from the reflection of a compiled stage. Owns the stage's
/// constant buffers and resource slot arrays, and the bindings that fill them.

use crate::compiler::{ShaderReflection, SlotClass, VariableFlags};
use crate::config::BindingConfig;
use crate::device::{
    GraphicsDevice, SamplerSlot, ShaderResourceSlot, ShaderStage, UnorderedAccessSlot,
};
use crate::effect::ParameterSource;
use crate::error::Result;
use crate::shader::{ConstantBufferStore, ParameterBinding, ParameterHandle};
use crate::{engine_debug, engine_trace, engine_warn};

/// Resource slot arrays of one stage, sized to the highest declared slot + 1
#[derive(Default, Clone)]
pub struct ResourceSlots {
    pub shader_resources: Vec<ShaderResourceSlot>,
    pub samplers: Vec<SamplerSlot>,
    pub unordered_access: Vec<UnorderedAccessSlot>,
}

impl ResourceSlots {
    /// Empty slots of the given lengths
    pub fn with_lengths(shader_resources: usize, samplers: usize, unordered_access: usize) -> Self {
        Self {
            shader_resources: vec![None; shader_resources],
            samplers: vec![None; samplers],
            unordered_access: vec![None; unordered_access],
        }
    }

    /// Empty slots with the same lengths as `self`
    pub fn cleared(&self) -> Self {
        Self::with_lengths(
            self.shader_resources.len(),
            self.samplers.len(),
            self.unordered_access.len(),
        )
    }
}

/// Binding table of one stage
pub struct BindingTable {
    stage: ShaderStage,
    constant_buffers: ConstantBufferStore,
    slots: ResourceSlots,
    bindings: Vec<ParameterBinding>,
}

impl BindingTable {
    /// Empty table (stage absent or not reflected)
    pub fn new(stage: ShaderStage) -> Self {
        Self {
            stage,
            constant_buffers: ConstantBufferStore::new(),
            slots: ResourceSlots::default(),
            bindings: Vec::new(),
        }
    }

    /// Build the table of `stage` from its reflection
    ///
    /// Only variables flagged as used and resources whose name matches an
    /// effect parameter get a binding. A declaration that cannot hold its
    /// parameter's type aborts the build.
    pub fn build(
        stage: ShaderStage,
        reflection: &ShaderReflection,
        parameters: &dyn ParameterSource,
        device: &mut dyn GraphicsDevice,
        config: &BindingConfig,
    ) -> Result<Self> {
        let mut table = Self::new(stage);

        // ========== CONSTANT BUFFERS ==========
        for reflected in &reflection.constant_buffers {
            let index = table.constant_buffers.allocate(reflected.size, device, config)?;

            for variable in &reflected.variables {
                if !variable.flags.contains(VariableFlags::USED) {
                    continue;
                }
                let Some(parameter) = parameters.parameter_by_name(&variable.name) else {
                    continue;
                };

                let handle = ParameterHandle::for_variable(stage, index as u32, variable);
                let binding = ParameterBinding::new(handle, parameter)?;
                engine_trace!("galaxy3d::BindingTable",
                    "{} stage: '{}' -> cbuffer '{}' +{} ({:?})",
                    stage.name(), variable.name, reflected.name, variable.offset, binding.writer());
                table.bindings.push(binding);
            }
        }

        // ========== SLOT ARRAYS ==========
        // Sized before any resource binding writes into them.
        let mut lengths = [0usize; 3];
        for resource in &reflection.bound_resources {
            let class = match resource.input_type.slot_class() {
                Some(SlotClass::ShaderResource) => 0,
                Some(SlotClass::Sampler) => 1,
                Some(SlotClass::UnorderedAccess) => 2,
                None => continue,
            };
            let end = resource.bind_point as usize + resource.bind_count.max(1) as usize;
            lengths[class] = lengths[class].max(end);
        }
        table.slots = ResourceSlots::with_lengths(lengths[0], lengths[1], lengths[2]);

        // ========== RESOURCES ==========
        for resource in &reflection.bound_resources {
            if resource.input_type.slot_class().is_none() {
                continue;
            }
            let Some(parameter) = parameters.parameter_by_name(&resource.name) else {
                continue;
            };

            let handle = ParameterHandle::for_resource(stage, resource);
            let binding = ParameterBinding::new(handle, parameter)?;
            engine_trace!("galaxy3d::BindingTable",
                "{} stage: '{}' -> slot {} ({:?})",
                stage.name(), resource.name, resource.bind_point, binding.writer());
            table.bindings.push(binding);
        }

        engine_debug!("galaxy3d::BindingTable",
            "{} stage: {} bindings, {} constant buffers, {} srv / {} sampler / {} uav slots",
            stage.name(), table.bindings.len(), table.constant_buffers.len(),
            lengths[0], lengths[1], lengths[2]);

        Ok(table)
    }

    /// Table for another effect instance with the same layout
    ///
    /// Mirrors are copied, GPU buffers are created anew, slot arrays keep their
    /// lengths but start empty, and bindings are resolved by name against
    /// `parameters`.
    pub fn rebind(
        &self,
        parameters: &dyn ParameterSource,
        device: &mut dyn GraphicsDevice,
        config: &BindingConfig,
    ) -> Result<Self> {
        let constant_buffers = self.constant_buffers.duplicate(device, config)?;

        let mut bindings = Vec::with_capacity(self.bindings.len());
        for binding in &self.bindings {
            match parameters.parameter_by_name(binding.parameter_name()) {
                Some(parameter) => bindings.push(ParameterBinding::new(*binding.handle(), parameter)?),
                None => engine_warn!("galaxy3d::BindingTable",
                    "{} stage: parameter '{}' not found, binding dropped",
                    self.stage.name(), binding.parameter_name()),
            }
        }

        Ok(Self {
            stage: self.stage,
            constant_buffers,
            slots: self.slots.cleared(),
            bindings,
        })
    }

    /// Run every binding's writer
    pub fn apply(&mut self) {
        for binding in &self.bindings {
            if !binding.apply(&mut self.constant_buffers, &mut self.slots) {
                engine_warn!("galaxy3d::BindingTable",
                    "{} stage: parameter '{}' no longer exists, binding skipped",
                    self.stage.name(), binding.parameter_name());
            }
        }
    }

    /// Upload dirty constant buffers
    pub fn upload(&mut self) -> Result<usize> {
        self.constant_buffers.upload()
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn bindings(&self) -> &[ParameterBinding] {
        &self.bindings
    }

    pub fn constant_buffers(&self) -> &ConstantBufferStore {
        &self.constant_buffers
    }

    pub fn shader_resources(&self) -> &[ShaderResourceSlot] {
        &self.slots.shader_resources
    }

    pub fn samplers(&self) -> &[SamplerSlot] {
        &self.slots.samplers
    }

    pub fn unordered_access_views(&self) -> &[UnorderedAccessSlot] {
        &self.slots.unordered_access
    }
}

#[cfg(test)]
#[path = "binding_table_tests.rs"]
mod tests;
