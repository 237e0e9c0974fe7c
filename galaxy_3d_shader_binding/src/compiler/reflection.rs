/// Reflection data returned by a shader compiler
///
/// Describes constant buffers and their variables, bound resources and the
/// vertex input signature of a compiled stage.

use bitflags::bitflags;

/// Scalar type of a constant buffer register component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// 32-bit boolean (0 or 1)
    Bool,
    Int32,
    UInt32,
    Float32,
}

/// Declared kind of a reflected variable or bound resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Void,
    Bool,
    Int,
    UInt,
    Float,
    Double,
    Struct,
    /// Read-only texture
    Texture,
    /// Read-only buffer
    Buffer,
    /// Read-write texture
    RwTexture,
    /// Read-write buffer
    RwBuffer,
    Sampler,
}

impl VariableKind {
    /// Scalar kind of a numeric variable (`None` for resources and structs)
    pub fn scalar_kind(self) -> Option<ScalarKind> {
        match self {
            VariableKind::Bool => Some(ScalarKind::Bool),
            VariableKind::Int => Some(ScalarKind::Int32),
            VariableKind::UInt => Some(ScalarKind::UInt32),
            VariableKind::Float => Some(ScalarKind::Float32),
            _ => None,
        }
    }
}

bitflags! {
    /// Reflected variable flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VariableFlags: u32 {
        const USER_PACKED = 0x1;
        /// Variable is referenced by the compiled code
        const USED = 0x2;
    }
}

/// Type description of a reflected variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectedType {
    pub kind: VariableKind,
    pub rows: u32,
    pub columns: u32,
    /// Array length, 0 if not an array
    pub elements: u32,
}

/// Variable inside a constant buffer
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectedVariable {
    pub name: String,
    /// Byte offset inside the constant buffer
    pub offset: u32,
    /// Size in bytes
    pub size: u32,
    pub ty: ReflectedType,
    pub flags: VariableFlags,
}

/// Reflected constant buffer
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectedConstantBuffer {
    pub name: String,
    /// Size in bytes, as declared
    pub size: u32,
    pub variables: Vec<ReflectedVariable>,
}

/// Kind of a bound resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderInputType {
    ConstantBuffer,
    TextureBuffer,
    Texture,
    Sampler,
    RwTyped,
    Structured,
    RwStructured,
    ByteAddress,
    RwByteAddress,
    AppendStructured,
    ConsumeStructured,
}

/// Slot array a bound resource lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotClass {
    Sampler,
    ShaderResource,
    UnorderedAccess,
}

impl ShaderInputType {
    /// Slot array for this input type (`None` for constant/texture buffers)
    pub fn slot_class(self) -> Option<SlotClass> {
        match self {
            ShaderInputType::Sampler => Some(SlotClass::Sampler),
            ShaderInputType::Texture
            | ShaderInputType::Structured
            | ShaderInputType::ByteAddress => Some(SlotClass::ShaderResource),
            ShaderInputType::RwTyped
            | ShaderInputType::RwStructured
            | ShaderInputType::RwByteAddress
            | ShaderInputType::AppendStructured
            | ShaderInputType::ConsumeStructured => Some(SlotClass::UnorderedAccess),
            ShaderInputType::ConstantBuffer | ShaderInputType::TextureBuffer => None,
        }
    }
}

/// View dimension of a bound resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceDimension {
    Unknown,
    Buffer,
    Texture1D,
    Texture1DArray,
    Texture2D,
    Texture2DArray,
    Texture2DMs,
    Texture2DMsArray,
    Texture3D,
    TextureCube,
    TextureCubeArray,
    BufferEx,
}

impl ResourceDimension {
    pub fn is_buffer(self) -> bool {
        matches!(self, ResourceDimension::Buffer | ResourceDimension::BufferEx)
    }
}

/// Resource bound to a stage slot
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectedBoundResource {
    pub name: String,
    pub input_type: ShaderInputType,
    /// First slot index
    pub bind_point: u32,
    /// Number of consecutive slots
    pub bind_count: u32,
    pub dimension: ResourceDimension,
}

impl ReflectedBoundResource {
    /// Declared kind of the resource, as a binding handle sees it
    pub fn variable_kind(&self) -> VariableKind {
        match self.input_type.slot_class() {
            Some(SlotClass::Sampler) => VariableKind::Sampler,
            Some(SlotClass::UnorderedAccess) if self.dimension.is_buffer() => VariableKind::RwBuffer,
            Some(SlotClass::UnorderedAccess) => VariableKind::RwTexture,
            _ if self.dimension.is_buffer() => VariableKind::Buffer,
            _ => VariableKind::Texture,
        }
    }
}

bitflags! {
    /// Register components used by a signature parameter
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ComponentMask: u8 {
        const X = 0x1;
        const Y = 0x2;
        const Z = 0x4;
        const W = 0x8;
    }
}

/// System value semantic of a signature parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemValue {
    Undefined,
    Position,
    ClipDistance,
    CullDistance,
    VertexId,
    InstanceId,
    PrimitiveId,
    IsFrontFace,
    Target,
    Depth,
}

/// Component type of a signature register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterComponentType {
    Unknown,
    UInt32,
    SInt32,
    Float32,
}

/// One entry of the vertex input signature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignatureParameter {
    pub semantic_name: String,
    pub semantic_index: u32,
    pub register: u32,
    pub system_value: SystemValue,
    pub component_type: RegisterComponentType,
    pub mask: ComponentMask,
    pub read_write_mask: ComponentMask,
    pub stream: u32,
}

/// Everything the binding layer needs from a compiled stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShaderReflection {
    pub constant_buffers: Vec<ReflectedConstantBuffer>,
    pub bound_resources: Vec<ReflectedBoundResource>,
    /// Vertex stage only
    pub input_parameters: Vec<SignatureParameter>,
}
