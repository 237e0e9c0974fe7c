/// Shader descriptions stored by an effect

use crate::device::StreamOutputDecl;

/// Technique and pass that first compiled a shader description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TechPass {
    pub technique: u32,
    pub pass: u32,
}

impl TechPass {
    pub fn new(technique: u32, pass: u32) -> Self {
        Self { technique, pass }
    }
}

/// How to compile one stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderDesc {
    /// Target profile, "auto", or empty for "stage absent"
    pub profile: String,
    /// Entry point
    pub func_name: String,
    /// Stream-output layout (vertex and geometry stages)
    pub stream_output: Vec<StreamOutputDecl>,
    /// Set once a pass has compiled this description; later passes share its result
    pub tech_pass: Option<TechPass>,
}

impl ShaderDesc {
    pub fn new(profile: &str, func_name: &str) -> Self {
        Self {
            profile: profile.to_string(),
            func_name: func_name.to_string(),
            stream_output: Vec::new(),
            tech_pass: None,
        }
    }

    pub fn with_stream_output(mut self, stream_output: Vec<StreamOutputDecl>) -> Self {
        self.stream_output = stream_output;
        self
    }

    /// True if the stage is absent
    pub fn is_empty(&self) -> bool {
        self.profile.is_empty()
    }
}
