//! Error types for the Galaxy3D shader binding layer
//!
//! Only failures that must abort shader object construction are errors.
//! Compile failures and unsupported feature levels are not: they clear the
//! validity flag of the affected stage instead.

use std::fmt;

/// Result type for shader binding operations
pub type Result<T> = std::result::Result<T, Error>;

/// Shader binding errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (device, context, compiler)
    BackendError(String),

    /// Out of GPU memory, returned by device backends
    OutOfMemory,

    /// Invalid resource (buffer, program, view, etc.)
    InvalidResource(String),

    /// GPU buffer or program object could not be created
    ResourceCreationFailed(String),

    /// Reflected variable kind has no writer for the effect parameter type
    BindingMismatch(String),

    /// Bytecode could not be reflected, returned by compiler backends
    ReflectionFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::ResourceCreationFailed(msg) => write!(f, "Resource creation failed: {}", msg),
            Error::BindingMismatch(msg) => write!(f, "Binding mismatch: {}", msg),
            Error::ReflectionFailed(msg) => write!(f, "Reflection failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
