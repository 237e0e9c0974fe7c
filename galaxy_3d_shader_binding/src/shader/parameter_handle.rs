/// Location of one effect parameter in a compiled stage

use crate::compiler::{ReflectedBoundResource, ReflectedVariable, VariableKind};
use crate::device::ShaderStage;

/// Where a parameter's value lives in a compiled stage
///
/// For constant buffer variables `offset` is a byte offset inside buffer
/// `cbuffer`. For bound resources `offset` is the slot index and `cbuffer` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterHandle {
    pub stage: ShaderStage,
    pub kind: VariableKind,
    pub cbuffer: u32,
    pub offset: u32,
    /// Array length, 0 if not an array
    pub elements: u32,
    pub rows: u8,
    pub columns: u8,
}

impl ParameterHandle {
    /// Handle of a constant buffer variable
    pub fn for_variable(stage: ShaderStage, cbuffer: u32, variable: &ReflectedVariable) -> Self {
        Self {
            stage,
            kind: variable.ty.kind,
            cbuffer,
            offset: variable.offset,
            elements: variable.ty.elements,
            rows: variable.ty.rows as u8,
            columns: variable.ty.columns as u8,
        }
    }

    /// Handle of a bound resource (texture, buffer, sampler, read-write view)
    pub fn for_resource(stage: ShaderStage, resource: &ReflectedBoundResource) -> Self {
        Self {
            stage,
            kind: resource.variable_kind(),
            cbuffer: 0,
            offset: resource.bind_point,
            elements: 1,
            rows: 0,
            columns: 1,
        }
    }
}
