/// Effect module - the parameter store shader objects bind against
///
/// An effect owns its parameters, constant buffer groups, shader source
/// fragments, shader descriptions and the techniques/passes whose shader
/// objects are compiled from them.

// Module declarations
pub mod data_type;
pub mod parameter;
pub mod resource;
pub mod effect;

// Re-export everything from effect.rs
pub use effect::*;

// Re-export from other modules
pub use data_type::*;
pub use parameter::*;
pub use resource::*;
