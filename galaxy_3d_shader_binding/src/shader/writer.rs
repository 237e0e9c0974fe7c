/// Typed parameter writers
///
/// One writer is selected per binding when the binding table is built, from
/// the effect parameter type and the reflected declaration. Applying it copies
/// the parameter's current value into a constant buffer mirror or a resource
/// slot.

use crate::compiler::{ScalarKind, SlotClass, VariableKind};
use crate::effect::{EffectDataType, EffectParameter, ParameterValue, ScalarValue};
use crate::error::{Error, Result};
use crate::shader::{ConstantBufferStore, ParameterHandle, ResourceSlots};
use crate::engine_error;

/// Size of one constant buffer register
pub const REGISTER_SIZE: usize = 16;

/// Encode one component as the declared 32-bit scalar type
pub fn encode_scalar(value: ScalarValue, kind: ScalarKind) -> [u8; 4] {
    match kind {
        ScalarKind::Bool => {
            let b = match value {
                ScalarValue::Bool(v) => v,
                ScalarValue::Int(v) => v != 0,
                ScalarValue::UInt(v) => v != 0,
                ScalarValue::Float(v) => v != 0.0,
            };
            (b as i32).to_ne_bytes()
        }
        ScalarKind::Int32 => {
            let i = match value {
                ScalarValue::Bool(v) => v as i32,
                ScalarValue::Int(v) => v,
                ScalarValue::UInt(v) => v as i32,
                ScalarValue::Float(v) => v as i32,
            };
            i.to_ne_bytes()
        }
        ScalarKind::UInt32 => {
            let u = match value {
                ScalarValue::Bool(v) => v as u32,
                ScalarValue::Int(v) => v as u32,
                ScalarValue::UInt(v) => v,
                ScalarValue::Float(v) => v as u32,
            };
            u.to_ne_bytes()
        }
        ScalarKind::Float32 => {
            let f = match value {
                ScalarValue::Bool(v) => if v { 1.0f32 } else { 0.0 },
                ScalarValue::Int(v) => v as f32,
                ScalarValue::UInt(v) => v as f32,
                ScalarValue::Float(v) => v,
            };
            f.to_ne_bytes()
        }
    }
}

/// Encode all four lanes into one register
fn encode_register(lanes: &[ScalarValue; 4], kind: ScalarKind) -> [u8; REGISTER_SIZE] {
    let mut register = [0u8; REGISTER_SIZE];
    for (chunk, lane) in register.chunks_exact_mut(4).zip(lanes) {
        chunk.copy_from_slice(&encode_scalar(*lane, kind));
    }
    register
}

/// Writer kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterWriter {
    /// Single component, compare then write
    Scalar { cbuffer: usize, offset: usize, dst: ScalarKind },
    /// 2 to 4 components, compare then write
    Vector { cbuffer: usize, offset: usize, components: usize, dst: ScalarKind },
    /// 4x4 matrix, transposed, `rows` registers compared and written
    Matrix { cbuffer: usize, offset: usize, rows: usize },
    /// Component 0 of one register per element, always dirty
    ScalarArray { cbuffer: usize, offset: usize, elements: usize, dst: ScalarKind },
    /// One zero-padded register per element, always dirty
    VectorArray { cbuffer: usize, offset: usize, elements: usize, dst: ScalarKind },
    /// `rows` registers per transposed matrix, always dirty
    MatrixArray { cbuffer: usize, offset: usize, elements: usize, rows: usize },
    /// Read-only view slot
    ShaderResource { slot: usize },
    /// Read-write view slot
    UnorderedAccess { slot: usize },
    /// Sampler slot
    Sampler { slot: usize },
}

impl ParameterWriter {
    /// Pick the writer for a parameter declared at `handle`
    ///
    /// Fails with `Error::BindingMismatch` when the declaration cannot hold the
    /// parameter type.
    pub fn select(handle: &ParameterHandle, parameter: &EffectParameter) -> Result<Self> {
        let data_type = parameter.data_type();
        let cbuffer = handle.cbuffer as usize;
        let offset = handle.offset as usize;
        let slot = handle.offset as usize;
        let elements = handle.elements.max(1) as usize;
        let is_array = parameter.is_array();

        let writer = match data_type.slot_class() {
            Some(SlotClass::Sampler) if handle.kind == VariableKind::Sampler => {
                Some(ParameterWriter::Sampler { slot })
            }
            Some(SlotClass::ShaderResource)
                if matches!(handle.kind, VariableKind::Texture | VariableKind::Buffer) =>
            {
                Some(ParameterWriter::ShaderResource { slot })
            }
            Some(SlotClass::UnorderedAccess)
                if matches!(handle.kind, VariableKind::RwTexture | VariableKind::RwBuffer) =>
            {
                Some(ParameterWriter::UnorderedAccess { slot })
            }
            Some(_) => None,
            None => match (data_type, handle.kind.scalar_kind()) {
                (EffectDataType::Float4x4, Some(ScalarKind::Float32)) => {
                    let rows = match handle.rows {
                        0 => 4,
                        r => (r as usize).min(4),
                    };
                    if is_array {
                        Some(ParameterWriter::MatrixArray { cbuffer, offset, elements, rows })
                    } else {
                        Some(ParameterWriter::Matrix { cbuffer, offset, rows })
                    }
                }
                (EffectDataType::Float4x4, _) => None,
                (_, Some(dst)) => match (data_type.components(), is_array) {
                    (1, false) => Some(ParameterWriter::Scalar { cbuffer, offset, dst }),
                    (components, false) => {
                        Some(ParameterWriter::Vector { cbuffer, offset, components, dst })
                    }
                    (1, true) => Some(ParameterWriter::ScalarArray { cbuffer, offset, elements, dst }),
                    (_, true) => Some(ParameterWriter::VectorArray { cbuffer, offset, elements, dst }),
                },
                (_, None) => None,
            },
        };

        writer.ok_or_else(|| {
            let message = format!(
                "Parameter '{}' of type {:?}{} cannot be bound to a {:?} declaration in the {} stage",
                parameter.name(),
                data_type,
                if is_array { "[]" } else { "" },
                handle.kind,
                handle.stage.name(),
            );
            engine_error!("galaxy3d::ParameterWriter", "{}", message);
            Error::BindingMismatch(message)
        })
    }

    /// Copy the parameter's current value to the destination
    pub fn apply(
        &self,
        parameter: &EffectParameter,
        constant_buffers: &mut ConstantBufferStore,
        slots: &mut ResourceSlots,
    ) {
        match *self {
            ParameterWriter::Scalar { cbuffer, offset, dst } => {
                let Some(lanes) = parameter.with_value(|v| v.lanes()) else { return };
                if let Some(mut view) = constant_buffers.view(cbuffer) {
                    view.write_if_changed(offset, &encode_scalar(lanes[0], dst));
                }
            }

            ParameterWriter::Vector { cbuffer, offset, components, dst } => {
                let Some(lanes) = parameter.with_value(|v| v.lanes()) else { return };
                let register = encode_register(&lanes, dst);
                if let Some(mut view) = constant_buffers.view(cbuffer) {
                    view.write_if_changed(offset, &register[..components * 4]);
                }
            }

            ParameterWriter::Matrix { cbuffer, offset, rows } => {
                let Some(matrix) = parameter.with_value(|v| v.matrix()) else { return };
                let transposed = matrix.transpose();
                let bytes: &[u8] = bytemuck::bytes_of(&transposed);
                if let Some(mut view) = constant_buffers.view(cbuffer) {
                    view.write_if_changed(offset, &bytes[..rows * REGISTER_SIZE]);
                }
            }

            ParameterWriter::ScalarArray { cbuffer, offset, elements, dst } => {
                let Some(values) = parameter.with_value(|v| v.array_lanes()) else { return };
                if values.is_empty() {
                    return;
                }
                if let Some(mut view) = constant_buffers.view(cbuffer) {
                    for (i, lanes) in values.iter().take(elements).enumerate() {
                        view.write(offset + i * REGISTER_SIZE, &encode_scalar(lanes[0], dst));
                    }
                    view.mark_dirty();
                }
            }

            ParameterWriter::VectorArray { cbuffer, offset, elements, dst } => {
                let Some(values) = parameter.with_value(|v| v.array_lanes()) else { return };
                if values.is_empty() {
                    return;
                }
                if let Some(mut view) = constant_buffers.view(cbuffer) {
                    for (i, lanes) in values.iter().take(elements).enumerate() {
                        view.write(offset + i * REGISTER_SIZE, &encode_register(lanes, dst));
                    }
                    view.mark_dirty();
                }
            }

            ParameterWriter::MatrixArray { cbuffer, offset, elements, rows } => {
                let Some(mut view) = constant_buffers.view(cbuffer) else { return };
                parameter.with_value(|value| {
                    if let Some(matrices) = value.matrices() {
                        let stride = rows * REGISTER_SIZE;
                        for (i, matrix) in matrices.iter().take(elements).enumerate() {
                            let transposed = matrix.transpose();
                            let bytes: &[u8] = bytemuck::bytes_of(&transposed);
                            view.write(offset + i * stride, &bytes[..stride]);
                        }
                    }
                });
                view.mark_dirty();
            }

            ParameterWriter::ShaderResource { slot } => {
                let resolved = parameter.with_value(|value| match value {
                    ParameterValue::Texture(Some(texture)) => texture.shader_resource_view(),
                    ParameterValue::Buffer(Some(buffer)) => buffer.shader_resource_view(),
                    _ => None,
                });
                if let Some(target) = slots.shader_resources.get_mut(slot) {
                    *target = resolved;
                }
            }

            ParameterWriter::UnorderedAccess { slot } => {
                let resolved = parameter.with_value(|value| match value {
                    ParameterValue::Texture(Some(texture)) => texture.unordered_access_view(),
                    ParameterValue::Buffer(Some(buffer)) => buffer.unordered_access_view(),
                    _ => None,
                });
                if let Some(target) = slots.unordered_access.get_mut(slot) {
                    *target = resolved;
                }
            }

            ParameterWriter::Sampler { slot } => {
                let resolved = parameter.with_value(|value| match value {
                    ParameterValue::Sampler(Some(sampler)) => Some(sampler.sampler_state()),
                    _ => None,
                });
                if let Some(target) = slots.samplers.get_mut(slot) {
                    *target = resolved;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
