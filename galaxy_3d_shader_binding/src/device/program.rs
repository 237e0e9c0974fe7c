/// Program trait, shader stages and program descriptor

/// Programmable pipeline stage
///
/// Per-stage state is always stored in fixed-size arrays indexed by `index()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Pixel,
    Geometry,
    Compute,
    Hull,
    Domain,
}

impl ShaderStage {
    /// Number of stages
    pub const COUNT: usize = 6;

    /// All stages, in binding order
    pub const ALL: [ShaderStage; ShaderStage::COUNT] = [
        ShaderStage::Vertex,
        ShaderStage::Pixel,
        ShaderStage::Geometry,
        ShaderStage::Compute,
        ShaderStage::Hull,
        ShaderStage::Domain,
    ];

    /// Array index of this stage
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human readable stage name
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Pixel => "pixel",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Compute => "compute",
            ShaderStage::Hull => "hull",
            ShaderStage::Domain => "domain",
        }
    }
}

/// One stream-output declaration entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamOutputDecl {
    pub stream: u32,
    pub semantic_name: String,
    pub semantic_index: u32,
    pub start_component: u8,
    pub component_count: u8,
    pub output_slot: u8,
}

/// Descriptor for creating a program object
#[derive(Debug, Clone)]
pub struct ProgramDesc<'a> {
    /// Stage the program object is created for
    pub stage: ShaderStage,
    /// Compiled bytecode
    pub bytecode: &'a [u8],
    /// Stream-output layout (geometry programs only, empty otherwise)
    pub stream_output: &'a [StreamOutputDecl],
}

/// Compiled program object
///
/// Shared between shader objects through `Arc`; never copied.
pub trait Program: Send + Sync {
    /// Stage this program runs in
    fn stage(&self) -> ShaderStage;
}
