/// Effect parameter data types

use crate::compiler::SlotClass;

/// Declared type of an effect parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectDataType {
    Bool,
    UInt,
    Int,
    Float,
    UInt2,
    UInt3,
    UInt4,
    Int2,
    Int3,
    Int4,
    Float2,
    Float3,
    Float4,
    Float4x4,
    Sampler,
    Texture1D,
    Texture2D,
    Texture3D,
    TextureCube,
    Texture1DArray,
    Texture2DArray,
    TextureCubeArray,
    Buffer,
    StructuredBuffer,
    ByteAddressBuffer,
    RwBuffer,
    RwStructuredBuffer,
    RwTexture1D,
    RwTexture2D,
    RwTexture3D,
    RwTexture1DArray,
    RwTexture2DArray,
    RwByteAddressBuffer,
    AppendStructuredBuffer,
    ConsumeStructuredBuffer,
}

impl EffectDataType {
    /// Number of components of a numeric type (16 for `Float4x4`, 0 for resources)
    pub fn components(self) -> usize {
        match self {
            EffectDataType::Bool | EffectDataType::UInt | EffectDataType::Int | EffectDataType::Float => 1,
            EffectDataType::UInt2 | EffectDataType::Int2 | EffectDataType::Float2 => 2,
            EffectDataType::UInt3 | EffectDataType::Int3 | EffectDataType::Float3 => 3,
            EffectDataType::UInt4 | EffectDataType::Int4 | EffectDataType::Float4 => 4,
            EffectDataType::Float4x4 => 16,
            _ => 0,
        }
    }

    /// True for samplers, textures and buffers
    pub fn is_resource(self) -> bool {
        self.slot_class().is_some()
    }

    /// Slot array a resource parameter is bound into
    pub fn slot_class(self) -> Option<SlotClass> {
        match self {
            EffectDataType::Sampler => Some(SlotClass::Sampler),
            EffectDataType::Texture1D
            | EffectDataType::Texture2D
            | EffectDataType::Texture3D
            | EffectDataType::TextureCube
            | EffectDataType::Texture1DArray
            | EffectDataType::Texture2DArray
            | EffectDataType::TextureCubeArray
            | EffectDataType::Buffer
            | EffectDataType::StructuredBuffer
            | EffectDataType::ByteAddressBuffer => Some(SlotClass::ShaderResource),
            EffectDataType::RwBuffer
            | EffectDataType::RwStructuredBuffer
            | EffectDataType::RwTexture1D
            | EffectDataType::RwTexture2D
            | EffectDataType::RwTexture3D
            | EffectDataType::RwTexture1DArray
            | EffectDataType::RwTexture2DArray
            | EffectDataType::RwByteAddressBuffer
            | EffectDataType::AppendStructuredBuffer
            | EffectDataType::ConsumeStructuredBuffer => Some(SlotClass::UnorderedAccess),
            _ => None,
        }
    }

    /// True for texture resources (read-only or read-write)
    pub fn is_texture(self) -> bool {
        matches!(
            self,
            EffectDataType::Texture1D
                | EffectDataType::Texture2D
                | EffectDataType::Texture3D
                | EffectDataType::TextureCube
                | EffectDataType::Texture1DArray
                | EffectDataType::Texture2DArray
                | EffectDataType::TextureCubeArray
                | EffectDataType::RwTexture1D
                | EffectDataType::RwTexture2D
                | EffectDataType::RwTexture3D
                | EffectDataType::RwTexture1DArray
                | EffectDataType::RwTexture2DArray
        )
    }

    /// True for buffer resources (read-only or read-write)
    pub fn is_buffer(self) -> bool {
        self.is_resource() && !self.is_texture() && self != EffectDataType::Sampler
    }

    /// HLSL type keyword
    pub fn type_name(self) -> &'static str {
        match self {
            EffectDataType::Bool => "bool",
            EffectDataType::UInt => "uint",
            EffectDataType::Int => "int",
            EffectDataType::Float => "float",
            EffectDataType::UInt2 => "uint2",
            EffectDataType::UInt3 => "uint3",
            EffectDataType::UInt4 => "uint4",
            EffectDataType::Int2 => "int2",
            EffectDataType::Int3 => "int3",
            EffectDataType::Int4 => "int4",
            EffectDataType::Float2 => "float2",
            EffectDataType::Float3 => "float3",
            EffectDataType::Float4 => "float4",
            EffectDataType::Float4x4 => "float4x4",
            EffectDataType::Sampler => "sampler",
            EffectDataType::Texture1D => "Texture1D",
            EffectDataType::Texture2D => "Texture2D",
            EffectDataType::Texture3D => "Texture3D",
            EffectDataType::TextureCube => "TextureCube",
            EffectDataType::Texture1DArray => "Texture1DArray",
            EffectDataType::Texture2DArray => "Texture2DArray",
            EffectDataType::TextureCubeArray => "TextureCubeArray",
            EffectDataType::Buffer => "Buffer",
            EffectDataType::StructuredBuffer => "StructuredBuffer",
            EffectDataType::ByteAddressBuffer => "ByteAddressBuffer",
            EffectDataType::RwBuffer => "RWBuffer",
            EffectDataType::RwStructuredBuffer => "RWStructuredBuffer",
            EffectDataType::RwTexture1D => "RWTexture1D",
            EffectDataType::RwTexture2D => "RWTexture2D",
            EffectDataType::RwTexture3D => "RWTexture3D",
            EffectDataType::RwTexture1DArray => "RWTexture1DArray",
            EffectDataType::RwTexture2DArray => "RWTexture2DArray",
            EffectDataType::RwByteAddressBuffer => "RWByteAddressBuffer",
            EffectDataType::AppendStructuredBuffer => "AppendStructuredBuffer",
            EffectDataType::ConsumeStructuredBuffer => "ConsumeStructuredBuffer",
        }
    }

    /// Minimum shader model for the declaration of a resource of this type to be emitted
    pub fn min_shader_model(self) -> u32 {
        match self {
            EffectDataType::Texture1DArray
            | EffectDataType::Texture2DArray
            | EffectDataType::TextureCubeArray
            | EffectDataType::Buffer
            | EffectDataType::StructuredBuffer
            | EffectDataType::ByteAddressBuffer
            | EffectDataType::RwStructuredBuffer
            | EffectDataType::RwByteAddressBuffer => 4,
            EffectDataType::RwBuffer
            | EffectDataType::RwTexture1D
            | EffectDataType::RwTexture2D
            | EffectDataType::RwTexture3D
            | EffectDataType::RwTexture1DArray
            | EffectDataType::RwTexture2DArray
            | EffectDataType::AppendStructuredBuffer
            | EffectDataType::ConsumeStructuredBuffer => 5,
            _ => 0,
        }
    }

    /// True if the declaration carries a `<element>` template argument
    pub fn has_element_type(self) -> bool {
        self.is_resource()
            && !matches!(
                self,
                EffectDataType::Sampler
                    | EffectDataType::ByteAddressBuffer
                    | EffectDataType::RwByteAddressBuffer
            )
    }
}
