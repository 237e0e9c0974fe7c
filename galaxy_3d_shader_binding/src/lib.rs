/*!
# Galaxy 3D Shader Binding

Shader parameter binding and constant buffer change tracking for Galaxy 3D.

Given the reflection of a compiled shader stage, this crate discovers which
effect parameters the stage uses, selects once a typed writer per parameter,
and at draw time copies the current values into CPU constant buffer mirrors
and resource slots, uploading only the buffers that actually changed.

## Architecture

- **GraphicsDevice / DeviceContext**: resource creation and draw-time attachment, implemented by a backend
- **ShaderCompiler**: compilation and reflection, implemented by a backend
- **Effect**: parameters, constant buffer groups, shader fragments, techniques and passes
- **ShaderObject**: compiled programs of a pass plus one binding table per stage
- **BindingTable**: constant buffer store, resource slots and parameter bindings of a stage

Compiled programs are shared between passes and effect instances; constant
buffers and bindings never are.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod device;
pub mod compiler;
pub mod effect;
pub mod shader;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging sink
    pub use crate::engine::Engine;

    // Configuration
    pub use crate::config::BindingConfig;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Device collaborator traits
    pub mod device {
        pub use crate::device::*;
    }

    // Compiler collaborator trait and reflection data
    pub mod compiler {
        pub use crate::compiler::*;
    }

    // Effect parameters and techniques
    pub mod effect {
        pub use crate::effect::*;
    }

    // Binding engine
    pub mod shader {
        pub use crate::shader::*;
    }
}

// Re-export math library at crate root
pub use glam;
