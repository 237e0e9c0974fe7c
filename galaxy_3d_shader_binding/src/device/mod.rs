/// Device module - the resource and command collaborators of the binding layer
///
/// Nothing here talks to a real graphics API. Backends implement these traits;
/// tests use the mock device.

// Module declarations
pub mod graphics_device;
pub mod buffer;
pub mod program;
pub mod view;
pub mod context;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use buffer::*;
pub use program::*;
pub use view::*;
pub use context::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_device;
