/// Shader module - parameter binding and constant buffer change tracking
///
/// A `ShaderObject` owns one `BindingTable` per stage. Each table holds the
/// stage's constant buffer mirrors, resource slot arrays and the list of
/// parameter bindings built from reflection.

// Module declarations
pub mod parameter_handle;
pub mod constant_buffer;
pub mod writer;
pub mod binding;
pub mod binding_table;
pub mod signature;
pub mod profile;
pub mod shader_desc;
pub mod shader_text;
pub mod shader_object;

// Re-export everything from shader_object.rs
pub use shader_object::*;

// Re-export from other modules
pub use parameter_handle::*;
pub use constant_buffer::*;
pub use writer::*;
pub use binding::*;
pub use binding_table::*;
pub use signature::*;
pub use profile::*;
pub use shader_desc::*;
pub use shader_text::*;
