/// Effect-side resource objects
///
/// Parameters hold these objects; writers resolve them to the view handles a
/// stage slot expects at apply time.

use std::sync::Arc;
use crate::device::{SamplerState, ShaderResourceView, UnorderedAccessView};

/// Texture object
pub trait Texture: Send + Sync {
    /// Read-only view, if the texture was created with one
    fn shader_resource_view(&self) -> Option<Arc<dyn ShaderResourceView>>;

    /// Read-write view, if the texture was created with one
    fn unordered_access_view(&self) -> Option<Arc<dyn UnorderedAccessView>>;
}

/// Structured, raw or typed buffer object
pub trait GraphicsBuffer: Send + Sync {
    /// Read-only view, if the buffer was created with one
    fn shader_resource_view(&self) -> Option<Arc<dyn ShaderResourceView>>;

    /// Read-write view, if the buffer was created with one
    fn unordered_access_view(&self) -> Option<Arc<dyn UnorderedAccessView>>;
}

/// Sampler object
pub trait Sampler: Send + Sync {
    fn sampler_state(&self) -> Arc<dyn SamplerState>;
}
