/// Compiler module - shader compilation and reflection collaborators
///
/// The binding layer never compiles shaders itself. It drives an injected
/// `ShaderCompiler` and consumes the reflection data it returns.

// Module declarations
pub mod shader_compiler;
pub mod reflection;
pub mod diagnostics;

pub use shader_compiler::*;
pub use reflection::*;

// Scripted compiler for tests
#[cfg(test)]
pub mod mock_compiler;
