/// Parameter binding - one effect parameter wired to one stage location

use std::sync::{Arc, Weak};

use crate::effect::EffectParameter;
use crate::error::Result;
use crate::shader::{ConstantBufferStore, ParameterHandle, ParameterWriter, ResourceSlots};

/// Binding of an effect parameter to a constant buffer location or slot
///
/// The parameter is observed, not owned: it belongs to the effect.
pub struct ParameterBinding {
    handle: ParameterHandle,
    parameter: Weak<EffectParameter>,
    parameter_name: String,
    writer: ParameterWriter,
}

impl ParameterBinding {
    /// Bind `parameter` at `handle`, selecting its writer
    pub fn new(handle: ParameterHandle, parameter: &Arc<EffectParameter>) -> Result<Self> {
        let writer = ParameterWriter::select(&handle, parameter)?;
        Ok(Self {
            handle,
            parameter: Arc::downgrade(parameter),
            parameter_name: parameter.name().to_string(),
            writer,
        })
    }

    pub fn handle(&self) -> &ParameterHandle {
        &self.handle
    }

    pub fn writer(&self) -> ParameterWriter {
        self.writer
    }

    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    /// The bound parameter, if its effect is still alive
    pub fn parameter(&self) -> Option<Arc<EffectParameter>> {
        self.parameter.upgrade()
    }

    /// Run the writer; returns false if the parameter no longer exists
    pub fn apply(&self, constant_buffers: &mut ConstantBufferStore, slots: &mut ResourceSlots) -> bool {
        match self.parameter.upgrade() {
            Some(parameter) => {
                self.writer.apply(&parameter, constant_buffers, slots);
                true
            }
            None => false,
        }
    }
}
