/// Binding layer configuration

use crate::compiler::ShaderMacro;

/// Configuration shared by every shader object built from an effect
///
/// Passed explicitly to compilation, cloning and binding-table construction.
#[derive(Debug, Clone)]
pub struct BindingConfig {
    /// GPU constant buffers are sized to a multiple of this (bytes)
    pub constant_buffer_alignment: u32,
    /// Macro identifying the backend, always defined to "1"
    pub backend_macro: String,
    /// Macros added when the device runs at a 9.x feature level
    pub low_feature_level_macros: Vec<ShaderMacro>,
    /// Additional macros appended after the built-in ones
    pub extra_macros: Vec<ShaderMacro>,
    /// Source lines shown on each side of a reported compile error
    pub diagnostic_context_lines: usize,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            constant_buffer_alignment: 16,
            backend_macro: "GALAXY3D_BACKEND".to_string(),
            low_feature_level_macros: vec![ShaderMacro::new("BC5_AS_AG", "1")],
            extra_macros: Vec::new(),
            diagnostic_context_lines: 2,
        }
    }
}

impl BindingConfig {
    /// Round a reflected constant buffer size up to the GPU alignment
    pub fn aligned_constant_buffer_size(&self, size: u64) -> u64 {
        let align = self.constant_buffer_alignment.max(1) as u64;
        (size + align - 1) / align * align
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
