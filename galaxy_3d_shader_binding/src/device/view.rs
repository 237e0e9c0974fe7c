/// Resource view handles attached to stage slots
///
/// Opaque to the binding layer: it only stores them in slot arrays and hands
/// them back to the device context.

use std::sync::Arc;

/// Read-only view of a texture or buffer
pub trait ShaderResourceView: Send + Sync {}

/// Read-write view of a texture or buffer
pub trait UnorderedAccessView: Send + Sync {}

/// Sampler state object
pub trait SamplerState: Send + Sync {}

/// Shader-resource slot (empty slots are `None`)
pub type ShaderResourceSlot = Option<Arc<dyn ShaderResourceView>>;

/// Unordered-access slot (empty slots are `None`)
pub type UnorderedAccessSlot = Option<Arc<dyn UnorderedAccessView>>;

/// Sampler slot (empty slots are `None`)
pub type SamplerSlot = Option<Arc<dyn SamplerState>>;
