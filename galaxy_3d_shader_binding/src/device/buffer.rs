/// Buffer trait and buffer descriptor

use bitflags::bitflags;
use crate::error::Result;

/// How the GPU and CPU are expected to use a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// GPU read/write, no CPU access
    Default,
    /// GPU read, CPU write every frame (constant buffers)
    Dynamic,
}

/// Pipeline binding of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferBinding {
    /// Constant (uniform) buffer
    ConstantBuffer,
    /// Shader resource or unordered access view source
    Resource,
}

bitflags! {
    /// CPU access rights requested at creation
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CpuAccessFlags: u32 {
        const READ = 0x1;
        const WRITE = 0x2;
    }
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: u64,
    /// Buffer usage
    pub usage: BufferUsage,
    /// Pipeline binding
    pub binding: BufferBinding,
    /// CPU access rights
    pub cpu_access: CpuAccessFlags,
}

impl BufferDesc {
    /// Dynamic, CPU-writable constant buffer of `size` bytes
    pub fn dynamic_constant_buffer(size: u64) -> Self {
        Self {
            size,
            usage: BufferUsage::Dynamic,
            binding: BufferBinding::ConstantBuffer,
            cpu_access: CpuAccessFlags::WRITE,
        }
    }
}

/// Buffer resource trait
///
/// Implemented by backend-specific buffer types.
/// The buffer is automatically destroyed when dropped.
pub trait Buffer: Send + Sync {
    /// Capacity in bytes
    fn size(&self) -> u64;

    /// Map for write with discard, copy `data` from offset 0, unmap
    ///
    /// Previous contents are discarded; there is no partial update. The mapped
    /// memory never escapes this call.
    fn write_discard(&self, data: &[u8]) -> Result<()>;
}
