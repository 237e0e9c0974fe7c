/// Constant buffer CPU mirrors, dirty flags and GPU buffers
///
/// A mirror is dirty exactly when it differs (or may differ) from its GPU
/// buffer. Uploads copy the whole mirror with a discarding map.

use std::sync::Arc;

use crate::config::BindingConfig;
use crate::device::{Buffer, BufferDesc, GraphicsDevice};
use crate::error::{Error, Result};
use crate::engine_error;

/// Bounds-checked write access to one constant buffer mirror
///
/// Writes past the end of the mirror are truncated.
pub struct ConstantBufferView<'a> {
    bytes: &'a mut [u8],
    dirty: &'a mut bool,
}

impl<'a> ConstantBufferView<'a> {
    pub fn new(bytes: &'a mut [u8], dirty: &'a mut bool) -> Self {
        Self { bytes, dirty }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        *self.dirty
    }

    pub fn mark_dirty(&mut self) {
        *self.dirty = true;
    }

    /// Number of bytes of a `len` byte write at `offset` that fit in the mirror
    fn writable(&self, offset: usize, len: usize) -> usize {
        self.bytes.len().saturating_sub(offset).min(len)
    }

    /// Write `data` at `offset` if it differs from the current bytes
    ///
    /// Only the bytes covered by `data` are compared. Sets the dirty flag and
    /// returns true when something changed.
    pub fn write_if_changed(&mut self, offset: usize, data: &[u8]) -> bool {
        let n = self.writable(offset, data.len());
        if n == 0 {
            return false;
        }

        let dst = &mut self.bytes[offset..offset + n];
        if *dst == data[..n] {
            return false;
        }
        dst.copy_from_slice(&data[..n]);
        *self.dirty = true;
        true
    }

    /// Write `data` at `offset` without comparing or touching the dirty flag
    ///
    /// Returns the number of bytes written.
    pub fn write(&mut self, offset: usize, data: &[u8]) -> usize {
        let n = self.writable(offset, data.len());
        if n == 0 {
            return 0;
        }
        self.bytes[offset..offset + n].copy_from_slice(&data[..n]);
        n
    }
}

/// Constant buffers of one stage
#[derive(Default)]
pub struct ConstantBufferStore {
    mirrors: Vec<Vec<u8>>,
    dirty: Vec<bool>,
    gpu_buffers: Vec<Arc<dyn Buffer>>,
}

impl ConstantBufferStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zeroed mirror of `size` bytes and its GPU buffer
    ///
    /// The new buffer starts dirty so the first bind uploads it.
    pub fn allocate(
        &mut self,
        size: u32,
        device: &mut dyn GraphicsDevice,
        config: &BindingConfig,
    ) -> Result<usize> {
        let gpu = Self::create_gpu_buffer(size as u64, device, config)?;
        self.mirrors.push(vec![0u8; size as usize]);
        self.dirty.push(true);
        self.gpu_buffers.push(gpu);
        Ok(self.mirrors.len() - 1)
    }

    fn create_gpu_buffer(
        size: u64,
        device: &mut dyn GraphicsDevice,
        config: &BindingConfig,
    ) -> Result<Arc<dyn Buffer>> {
        let aligned = config
            .aligned_constant_buffer_size(size)
            .max(config.constant_buffer_alignment.max(1) as u64);

        device
            .create_buffer(BufferDesc::dynamic_constant_buffer(aligned))
            .map_err(|e| {
                let message = format!("Constant buffer of {} bytes: {}", aligned, e);
                engine_error!("galaxy3d::ConstantBufferStore", "{}", message);
                Error::ResourceCreationFailed(message)
            })
    }

    /// Same mirrors, fresh GPU buffers sized from them, every buffer dirty
    pub fn duplicate(
        &self,
        device: &mut dyn GraphicsDevice,
        config: &BindingConfig,
    ) -> Result<Self> {
        let mut gpu_buffers = Vec::with_capacity(self.mirrors.len());
        for mirror in &self.mirrors {
            gpu_buffers.push(Self::create_gpu_buffer(mirror.len() as u64, device, config)?);
        }

        Ok(Self {
            mirrors: self.mirrors.clone(),
            dirty: vec![true; self.mirrors.len()],
            gpu_buffers,
        })
    }

    pub fn len(&self) -> usize {
        self.mirrors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mirrors.is_empty()
    }

    pub fn mirror(&self, index: usize) -> Option<&[u8]> {
        self.mirrors.get(index).map(|m| m.as_slice())
    }

    pub fn is_dirty(&self, index: usize) -> bool {
        self.dirty.get(index).copied().unwrap_or(false)
    }

    pub fn gpu_buffer(&self, index: usize) -> Option<&Arc<dyn Buffer>> {
        self.gpu_buffers.get(index)
    }

    /// GPU buffers in slot order
    pub fn gpu_buffers(&self) -> &[Arc<dyn Buffer>] {
        &self.gpu_buffers
    }

    /// Write access to mirror `index`
    pub fn view(&mut self, index: usize) -> Option<ConstantBufferView<'_>> {
        let bytes = self.mirrors.get_mut(index)?;
        let dirty = self.dirty.get_mut(index)?;
        Some(ConstantBufferView::new(bytes, dirty))
    }

    /// Upload every dirty mirror and clear its flag
    ///
    /// Returns the number of buffers uploaded.
    pub fn upload(&mut self) -> Result<usize> {
        let mut uploaded = 0;
        for ((mirror, dirty), gpu) in self.mirrors.iter().zip(self.dirty.iter_mut()).zip(&self.gpu_buffers) {
            if *dirty {
                gpu.write_discard(mirror)?;
                *dirty = false;
                uploaded += 1;
            }
        }
        Ok(uploaded)
    }
}

#[cfg(test)]
#[path = "constant_buffer_tests.rs"]
mod tests;
