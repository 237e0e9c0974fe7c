/// ShaderCompiler trait, compile requests and macros

use crate::error::Result;
use crate::compiler::ShaderReflection;

/// Preprocessor definition passed to the compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderMacro {
    pub name: String,
    pub value: String,
}

impl ShaderMacro {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// One compilation of one stage
#[derive(Debug, Clone)]
pub struct CompileRequest<'a> {
    /// Full shader source text
    pub source: &'a str,
    /// Entry point function name
    pub entry_point: &'a str,
    /// Resolved profile (never "auto")
    pub profile: &'a str,
    /// Macros, in definition order
    pub macros: &'a [ShaderMacro],
}

/// Result of a compilation
///
/// Warnings may come with bytecode; errors come without.
#[derive(Debug, Clone, Default)]
pub struct CompileOutput {
    /// Compiled bytecode, `None` on failure
    pub bytecode: Option<Vec<u8>>,
    /// Compiler messages, if any
    pub diagnostics: Option<String>,
}

/// Shader compiler and reflector
///
/// Implemented by each backend (HLSL compiler, offline cache, ...).
pub trait ShaderCompiler {
    /// Compile one stage
    fn compile(&self, request: &CompileRequest) -> CompileOutput;

    /// Reflect compiled bytecode
    fn reflect(&self, bytecode: &[u8]) -> Result<ShaderReflection>;
}
