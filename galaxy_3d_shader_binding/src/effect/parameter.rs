/// Effect parameters and their values
///
/// Parameters are owned by the effect and shared with bindings through `Arc`.
/// Bindings only read values; the effect side writes them.

use std::sync::{Arc, RwLock};
use glam::{IVec2, IVec3, IVec4, Mat4, UVec2, UVec3, UVec4, Vec2, Vec3, Vec4};

use crate::error::{Error, Result};
use crate::effect::{EffectDataType, GraphicsBuffer, Sampler, Texture};
use crate::engine_error;

/// Element type used for resource declarations that carry none
pub const DEFAULT_ELEMENT_TYPE: &str = "float4";

/// One scalar component of a numeric value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarValue {
    Bool(bool),
    Int(i32),
    UInt(u32),
    Float(f32),
}

/// Current value of an effect parameter
#[derive(Clone)]
pub enum ParameterValue {
    Bool(bool),
    UInt(u32),
    Int(i32),
    Float(f32),
    UInt2(UVec2),
    UInt3(UVec3),
    UInt4(UVec4),
    Int2(IVec2),
    Int3(IVec3),
    Int4(IVec4),
    Float2(Vec2),
    Float3(Vec3),
    Float4(Vec4),
    Float4x4(Mat4),
    BoolArray(Vec<bool>),
    UIntArray(Vec<u32>),
    IntArray(Vec<i32>),
    FloatArray(Vec<f32>),
    UInt2Array(Vec<UVec2>),
    UInt3Array(Vec<UVec3>),
    UInt4Array(Vec<UVec4>),
    Int2Array(Vec<IVec2>),
    Int3Array(Vec<IVec3>),
    Int4Array(Vec<IVec4>),
    Float2Array(Vec<Vec2>),
    Float3Array(Vec<Vec3>),
    Float4Array(Vec<Vec4>),
    Float4x4Array(Vec<Mat4>),
    Sampler(Option<Arc<dyn Sampler>>),
    Texture(Option<Arc<dyn Texture>>),
    Buffer(Option<Arc<dyn GraphicsBuffer>>),
}

fn lanes_of<T: Copy>(src: &[T], wrap: fn(T) -> ScalarValue, zero: T) -> [ScalarValue; 4] {
    let mut lanes = [wrap(zero); 4];
    for (lane, v) in lanes.iter_mut().zip(src) {
        *lane = wrap(*v);
    }
    lanes
}

impl ParameterValue {
    /// Zero value for a parameter declaration
    pub fn default_for(data_type: EffectDataType, array_size: Option<u32>) -> Self {
        let n = array_size.unwrap_or(0) as usize;
        match (data_type, array_size.is_some()) {
            (EffectDataType::Bool, false) => ParameterValue::Bool(false),
            (EffectDataType::UInt, false) => ParameterValue::UInt(0),
            (EffectDataType::Int, false) => ParameterValue::Int(0),
            (EffectDataType::Float, false) => ParameterValue::Float(0.0),
            (EffectDataType::UInt2, false) => ParameterValue::UInt2(UVec2::ZERO),
            (EffectDataType::UInt3, false) => ParameterValue::UInt3(UVec3::ZERO),
            (EffectDataType::UInt4, false) => ParameterValue::UInt4(UVec4::ZERO),
            (EffectDataType::Int2, false) => ParameterValue::Int2(IVec2::ZERO),
            (EffectDataType::Int3, false) => ParameterValue::Int3(IVec3::ZERO),
            (EffectDataType::Int4, false) => ParameterValue::Int4(IVec4::ZERO),
            (EffectDataType::Float2, false) => ParameterValue::Float2(Vec2::ZERO),
            (EffectDataType::Float3, false) => ParameterValue::Float3(Vec3::ZERO),
            (EffectDataType::Float4, false) => ParameterValue::Float4(Vec4::ZERO),
            (EffectDataType::Float4x4, false) => ParameterValue::Float4x4(Mat4::ZERO),
            (EffectDataType::Bool, true) => ParameterValue::BoolArray(vec![false; n]),
            (EffectDataType::UInt, true) => ParameterValue::UIntArray(vec![0; n]),
            (EffectDataType::Int, true) => ParameterValue::IntArray(vec![0; n]),
            (EffectDataType::Float, true) => ParameterValue::FloatArray(vec![0.0; n]),
            (EffectDataType::UInt2, true) => ParameterValue::UInt2Array(vec![UVec2::ZERO; n]),
            (EffectDataType::UInt3, true) => ParameterValue::UInt3Array(vec![UVec3::ZERO; n]),
            (EffectDataType::UInt4, true) => ParameterValue::UInt4Array(vec![UVec4::ZERO; n]),
            (EffectDataType::Int2, true) => ParameterValue::Int2Array(vec![IVec2::ZERO; n]),
            (EffectDataType::Int3, true) => ParameterValue::Int3Array(vec![IVec3::ZERO; n]),
            (EffectDataType::Int4, true) => ParameterValue::Int4Array(vec![IVec4::ZERO; n]),
            (EffectDataType::Float2, true) => ParameterValue::Float2Array(vec![Vec2::ZERO; n]),
            (EffectDataType::Float3, true) => ParameterValue::Float3Array(vec![Vec3::ZERO; n]),
            (EffectDataType::Float4, true) => ParameterValue::Float4Array(vec![Vec4::ZERO; n]),
            (EffectDataType::Float4x4, true) => ParameterValue::Float4x4Array(vec![Mat4::ZERO; n]),
            (EffectDataType::Sampler, _) => ParameterValue::Sampler(None),
            (ty, _) if ty.is_texture() => ParameterValue::Texture(None),
            _ => ParameterValue::Buffer(None),
        }
    }

    /// True if this value can be stored in a parameter of the given declaration
    pub fn matches(&self, data_type: EffectDataType, is_array: bool) -> bool {
        match self {
            ParameterValue::Sampler(_) => data_type == EffectDataType::Sampler,
            ParameterValue::Texture(_) => data_type.is_texture(),
            ParameterValue::Buffer(_) => data_type.is_buffer(),
            numeric => {
                let default = ParameterValue::default_for(data_type, is_array.then_some(0));
                !data_type.is_resource()
                    && std::mem::discriminant(numeric) == std::mem::discriminant(&default)
            }
        }
    }

    /// Components of a non-array numeric value, zero padded to 4 lanes
    pub fn lanes(&self) -> Option<[ScalarValue; 4]> {
        let lanes = match self {
            ParameterValue::Bool(v) => lanes_of(&[*v], ScalarValue::Bool, false),
            ParameterValue::UInt(v) => lanes_of(&[*v], ScalarValue::UInt, 0),
            ParameterValue::Int(v) => lanes_of(&[*v], ScalarValue::Int, 0),
            ParameterValue::Float(v) => lanes_of(&[*v], ScalarValue::Float, 0.0),
            ParameterValue::UInt2(v) => lanes_of(&v.to_array(), ScalarValue::UInt, 0),
            ParameterValue::UInt3(v) => lanes_of(&v.to_array(), ScalarValue::UInt, 0),
            ParameterValue::UInt4(v) => lanes_of(&v.to_array(), ScalarValue::UInt, 0),
            ParameterValue::Int2(v) => lanes_of(&v.to_array(), ScalarValue::Int, 0),
            ParameterValue::Int3(v) => lanes_of(&v.to_array(), ScalarValue::Int, 0),
            ParameterValue::Int4(v) => lanes_of(&v.to_array(), ScalarValue::Int, 0),
            ParameterValue::Float2(v) => lanes_of(&v.to_array(), ScalarValue::Float, 0.0),
            ParameterValue::Float3(v) => lanes_of(&v.to_array(), ScalarValue::Float, 0.0),
            ParameterValue::Float4(v) => lanes_of(&v.to_array(), ScalarValue::Float, 0.0),
            _ => return None,
        };
        Some(lanes)
    }

    /// Components of every element of a numeric array, zero padded to 4 lanes
    pub fn array_lanes(&self) -> Option<Vec<[ScalarValue; 4]>> {
        let lanes = match self {
            ParameterValue::BoolArray(v) => v.iter().map(|x| lanes_of(&[*x], ScalarValue::Bool, false)).collect(),
            ParameterValue::UIntArray(v) => v.iter().map(|x| lanes_of(&[*x], ScalarValue::UInt, 0)).collect(),
            ParameterValue::IntArray(v) => v.iter().map(|x| lanes_of(&[*x], ScalarValue::Int, 0)).collect(),
            ParameterValue::FloatArray(v) => v.iter().map(|x| lanes_of(&[*x], ScalarValue::Float, 0.0)).collect(),
            ParameterValue::UInt2Array(v) => v.iter().map(|x| lanes_of(&x.to_array(), ScalarValue::UInt, 0)).collect(),
            ParameterValue::UInt3Array(v) => v.iter().map(|x| lanes_of(&x.to_array(), ScalarValue::UInt, 0)).collect(),
            ParameterValue::UInt4Array(v) => v.iter().map(|x| lanes_of(&x.to_array(), ScalarValue::UInt, 0)).collect(),
            ParameterValue::Int2Array(v) => v.iter().map(|x| lanes_of(&x.to_array(), ScalarValue::Int, 0)).collect(),
            ParameterValue::Int3Array(v) => v.iter().map(|x| lanes_of(&x.to_array(), ScalarValue::Int, 0)).collect(),
            ParameterValue::Int4Array(v) => v.iter().map(|x| lanes_of(&x.to_array(), ScalarValue::Int, 0)).collect(),
            ParameterValue::Float2Array(v) => v.iter().map(|x| lanes_of(&x.to_array(), ScalarValue::Float, 0.0)).collect(),
            ParameterValue::Float3Array(v) => v.iter().map(|x| lanes_of(&x.to_array(), ScalarValue::Float, 0.0)).collect(),
            ParameterValue::Float4Array(v) => v.iter().map(|x| lanes_of(&x.to_array(), ScalarValue::Float, 0.0)).collect(),
            _ => return None,
        };
        Some(lanes)
    }

    /// Matrix value
    pub fn matrix(&self) -> Option<Mat4> {
        match self {
            ParameterValue::Float4x4(m) => Some(*m),
            _ => None,
        }
    }

    /// Matrix array value
    pub fn matrices(&self) -> Option<&[Mat4]> {
        match self {
            ParameterValue::Float4x4Array(m) => Some(m),
            _ => None,
        }
    }
}

/// Named, typed effect parameter
pub struct EffectParameter {
    name: String,
    data_type: EffectDataType,
    array_size: Option<u32>,
    element_type: Option<String>,
    value: RwLock<ParameterValue>,
}

impl EffectParameter {
    /// Create a non-array parameter holding the zero value of its type
    pub fn new(name: &str, data_type: EffectDataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            array_size: None,
            element_type: None,
            value: RwLock::new(ParameterValue::default_for(data_type, None)),
        }
    }

    /// Create an array parameter of `array_size` zeroed elements
    pub fn new_array(name: &str, data_type: EffectDataType, array_size: u32) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            array_size: Some(array_size),
            element_type: None,
            value: RwLock::new(ParameterValue::default_for(data_type, Some(array_size))),
        }
    }

    /// Set the element type used in resource declarations (`Texture2D<uint4>`, ...)
    pub fn with_element_type(mut self, element_type: &str) -> Self {
        self.element_type = Some(element_type.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> EffectDataType {
        self.data_type
    }

    pub fn array_size(&self) -> Option<u32> {
        self.array_size
    }

    pub fn is_array(&self) -> bool {
        self.array_size.is_some()
    }

    pub fn element_type(&self) -> &str {
        self.element_type.as_deref().unwrap_or(DEFAULT_ELEMENT_TYPE)
    }

    /// Replace the value
    ///
    /// Fails if the value does not fit the declared type.
    pub fn set_value(&self, value: ParameterValue) -> Result<()> {
        if !value.matches(self.data_type, self.is_array()) {
            let message = format!(
                "Value does not match declaration of parameter '{}' ({:?}{})",
                self.name,
                self.data_type,
                if self.is_array() { "[]" } else { "" }
            );
            engine_error!("galaxy3d::EffectParameter", "{}", message);
            return Err(Error::InvalidResource(message));
        }

        match self.value.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
        Ok(())
    }

    /// Run `f` on the current value under the read lock
    pub fn with_value<R>(&self, f: impl FnOnce(&ParameterValue) -> R) -> R {
        match self.value.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Copy of the current value
    pub fn value(&self) -> ParameterValue {
        self.with_value(|v| v.clone())
    }

    /// New parameter with the same declaration and value
    pub fn duplicate(&self) -> Self {
        Self {
            name: self.name.clone(),
            data_type: self.data_type,
            array_size: self.array_size,
            element_type: self.element_type.clone(),
            value: RwLock::new(self.value()),
        }
    }
}

/// Name lookup of effect parameters, as consumed by binding-table construction
pub trait ParameterSource {
    fn parameter_by_name(&self, name: &str) -> Option<&Arc<EffectParameter>>;
}

#[cfg(test)]
#[path = "parameter_tests.rs"]
mod tests;
