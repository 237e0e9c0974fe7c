/// Scripted shader compiler for unit tests
///
/// Each entry point is registered with the reflection its "bytecode" should
/// produce. Every compile request is recorded.

use std::sync::Mutex;
use rustc_hash::FxHashMap;

use crate::compiler::{
    CompileOutput, CompileRequest, ComponentMask, RegisterComponentType, ReflectedBoundResource,
    ReflectedConstantBuffer, ReflectedType, ReflectedVariable, ResourceDimension, ShaderCompiler,
    ShaderInputType, ShaderMacro, ShaderReflection, SignatureParameter, SystemValue,
    VariableFlags, VariableKind,
};
use crate::error::{Error, Result};

const BYTECODE_PREFIX: &str = "bytecode:";

/// A compile call as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedCompile {
    pub entry_point: String,
    pub profile: String,
    pub macros: Vec<ShaderMacro>,
    pub source: String,
}

#[derive(Default)]
pub struct MockShaderCompiler {
    pub shaders: FxHashMap<String, ShaderReflection>,
    pub failures: FxHashMap<String, String>,
    pub warnings: FxHashMap<String, String>,
    pub unreflectable: Vec<String>,
    pub requests: Mutex<Vec<RecordedCompile>>,
}

impl MockShaderCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry point compiles and reflects to `reflection`
    pub fn add_shader(&mut self, entry_point: &str, reflection: ShaderReflection) {
        self.shaders.insert(entry_point.to_string(), reflection);
    }

    /// Entry point fails to compile with `diagnostics`
    pub fn add_failure(&mut self, entry_point: &str, diagnostics: &str) {
        self.failures.insert(entry_point.to_string(), diagnostics.to_string());
    }

    pub fn bytecode_for(entry_point: &str) -> Vec<u8> {
        format!("{}{}", BYTECODE_PREFIX, entry_point).into_bytes()
    }

    pub fn compile_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn recorded(&self) -> Vec<RecordedCompile> {
        self.requests.lock().unwrap().clone()
    }
}

impl ShaderCompiler for MockShaderCompiler {
    fn compile(&self, request: &CompileRequest) -> CompileOutput {
        self.requests.lock().unwrap().push(RecordedCompile {
            entry_point: request.entry_point.to_string(),
            profile: request.profile.to_string(),
            macros: request.macros.to_vec(),
            source: request.source.to_string(),
        });

        if let Some(diagnostics) = self.failures.get(request.entry_point) {
            return CompileOutput { bytecode: None, diagnostics: Some(diagnostics.clone()) };
        }
        if self.shaders.contains_key(request.entry_point) {
            return CompileOutput {
                bytecode: Some(Self::bytecode_for(request.entry_point)),
                diagnostics: self.warnings.get(request.entry_point).cloned(),
            };
        }
        CompileOutput {
            bytecode: None,
            diagnostics: Some(format!(
                "memory(1,1): error X3501: '{}': entrypoint not found", request.entry_point
            )),
        }
    }

    fn reflect(&self, bytecode: &[u8]) -> Result<ShaderReflection> {
        let text = String::from_utf8_lossy(bytecode);
        let entry_point = text.strip_prefix(BYTECODE_PREFIX).unwrap_or(&text).to_string();
        if self.unreflectable.contains(&entry_point) {
            return Err(Error::ReflectionFailed(entry_point));
        }
        self.shaders
            .get(&entry_point)
            .cloned()
            .ok_or(Error::ReflectionFailed(entry_point))
    }
}

// ============================================================================
// Reflection builders
// ============================================================================

/// Constant buffer variable flagged as used
pub fn used_variable(
    name: &str,
    offset: u32,
    kind: VariableKind,
    rows: u32,
    columns: u32,
    elements: u32,
) -> ReflectedVariable {
    ReflectedVariable {
        name: name.to_string(),
        offset,
        size: rows * columns * 4 * elements.max(1),
        ty: ReflectedType { kind, rows, columns, elements },
        flags: VariableFlags::USED,
    }
}

/// Constant buffer variable the compiled code never references
pub fn unused_variable(name: &str, offset: u32, kind: VariableKind) -> ReflectedVariable {
    ReflectedVariable {
        flags: VariableFlags::empty(),
        ..used_variable(name, offset, kind, 1, 1, 0)
    }
}

pub fn constant_buffer(name: &str, size: u32, variables: Vec<ReflectedVariable>) -> ReflectedConstantBuffer {
    ReflectedConstantBuffer { name: name.to_string(), size, variables }
}

pub fn bound_resource(
    name: &str,
    input_type: ShaderInputType,
    bind_point: u32,
    dimension: ResourceDimension,
) -> ReflectedBoundResource {
    ReflectedBoundResource {
        name: name.to_string(),
        input_type,
        bind_point,
        bind_count: 1,
        dimension,
    }
}

pub fn signature_parameter(semantic_name: &str, semantic_index: u32, register: u32) -> SignatureParameter {
    SignatureParameter {
        semantic_name: semantic_name.to_string(),
        semantic_index,
        register,
        system_value: SystemValue::Undefined,
        component_type: RegisterComponentType::Float32,
        mask: ComponentMask::all(),
        read_write_mask: ComponentMask::all(),
        stream: 0,
    }
}
