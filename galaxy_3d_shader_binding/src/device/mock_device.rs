/// Mock graphics device for unit tests (no GPU required)
///
/// Records every object it creates and every command recorded into the mock
/// context, so shader object behavior can be asserted without a backend.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::device::{
    Buffer, BufferDesc, DeviceCaps, DeviceContext, FeatureLevel, GraphicsDevice,
    Program, ProgramDesc, SamplerState, ShaderResourceView, ShaderStage,
    UnorderedAccessView, ShaderResourceSlot, SamplerSlot, UnorderedAccessSlot,
};
use crate::effect::{GraphicsBuffer, Sampler, Texture};
use crate::error::{Error, Result};

/// Compare two shared objects by address (ignores vtable metadata)
pub fn same_object<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

// ============================================================================
// Mock Buffer
// ============================================================================

pub struct MockBuffer {
    pub size: u64,
    pub contents: Mutex<Vec<u8>>,
    pub uploads: AtomicUsize,
}

impl MockBuffer {
    pub fn new(size: u64) -> Self {
        Self {
            size,
            contents: Mutex::new(vec![0u8; size as usize]),
            uploads: AtomicUsize::new(0),
        }
    }

    pub fn contents(&self) -> Vec<u8> {
        self.contents.lock().unwrap().clone()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn write_discard(&self, data: &[u8]) -> Result<()> {
        if data.len() as u64 > self.size {
            return Err(Error::InvalidResource(format!(
                "write of {} bytes into {} byte buffer", data.len(), self.size
            )));
        }
        let mut contents = self.contents.lock().unwrap();
        contents.iter_mut().for_each(|b| *b = 0);
        contents[..data.len()].copy_from_slice(data);
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Mock Program
// ============================================================================

pub struct MockProgram {
    pub stage: ShaderStage,
    pub bytecode: Vec<u8>,
    pub stream_output: bool,
}

impl Program for MockProgram {
    fn stage(&self) -> ShaderStage {
        self.stage
    }
}

// ============================================================================
// Mock Views
// ============================================================================

/// Named view usable as shader resource, unordered access or sampler state
#[derive(Debug)]
pub struct MockView {
    pub name: String,
}

impl MockView {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self { name: name.to_string() })
    }
}

impl ShaderResourceView for MockView {}
impl UnorderedAccessView for MockView {}
impl SamplerState for MockView {}

// ============================================================================
// Mock effect resources
// ============================================================================

pub struct MockTexture {
    pub srv: Option<Arc<MockView>>,
    pub uav: Option<Arc<MockView>>,
}

impl MockTexture {
    /// Texture with both views, named `<name>.srv` and `<name>.uav`
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            srv: Some(MockView::new(&format!("{}.srv", name))),
            uav: Some(MockView::new(&format!("{}.uav", name))),
        })
    }
}

impl Texture for MockTexture {
    fn shader_resource_view(&self) -> Option<Arc<dyn ShaderResourceView>> {
        self.srv.clone().map(|v| v as Arc<dyn ShaderResourceView>)
    }

    fn unordered_access_view(&self) -> Option<Arc<dyn UnorderedAccessView>> {
        self.uav.clone().map(|v| v as Arc<dyn UnorderedAccessView>)
    }
}

pub struct MockGraphicsBuffer {
    pub srv: Option<Arc<MockView>>,
    pub uav: Option<Arc<MockView>>,
}

impl MockGraphicsBuffer {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            srv: Some(MockView::new(&format!("{}.srv", name))),
            uav: Some(MockView::new(&format!("{}.uav", name))),
        })
    }
}

impl GraphicsBuffer for MockGraphicsBuffer {
    fn shader_resource_view(&self) -> Option<Arc<dyn ShaderResourceView>> {
        self.srv.clone().map(|v| v as Arc<dyn ShaderResourceView>)
    }

    fn unordered_access_view(&self) -> Option<Arc<dyn UnorderedAccessView>> {
        self.uav.clone().map(|v| v as Arc<dyn UnorderedAccessView>)
    }
}

pub struct MockSampler {
    pub state: Arc<MockView>,
}

impl MockSampler {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self { state: MockView::new(name) })
    }
}

impl Sampler for MockSampler {
    fn sampler_state(&self) -> Arc<dyn SamplerState> {
        self.state.clone()
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

pub struct MockGraphicsDevice {
    pub caps: DeviceCaps,
    pub buffers: Vec<Arc<MockBuffer>>,
    pub programs: Vec<Arc<MockProgram>>,
    pub fail_buffer_creation: bool,
    pub fail_program_stages: Vec<ShaderStage>,
}

impl MockGraphicsDevice {
    pub fn new(feature_level: FeatureLevel) -> Self {
        Self {
            caps: DeviceCaps::for_feature_level(feature_level),
            buffers: Vec::new(),
            programs: Vec::new(),
            fail_buffer_creation: false,
            fail_program_stages: Vec::new(),
        }
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn caps(&self) -> &DeviceCaps {
        &self.caps
    }

    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        if self.fail_buffer_creation {
            return Err(Error::OutOfMemory);
        }
        let buffer = Arc::new(MockBuffer::new(desc.size));
        self.buffers.push(buffer.clone());
        Ok(buffer)
    }

    fn create_program(&mut self, desc: ProgramDesc) -> Result<Arc<dyn Program>> {
        if self.fail_program_stages.contains(&desc.stage) {
            return Err(Error::ResourceCreationFailed(format!(
                "mock {} program", desc.stage.name()
            )));
        }
        let program = Arc::new(MockProgram {
            stage: desc.stage,
            bytecode: desc.bytecode.to_vec(),
            stream_output: !desc.stream_output.is_empty(),
        });
        self.programs.push(program.clone());
        Ok(program)
    }
}

// ============================================================================
// Mock DeviceContext
// ============================================================================

pub struct MockDeviceContext {
    pub commands: Vec<String>,
    pub programs: [Option<Arc<dyn Program>>; ShaderStage::COUNT],
    pub constant_buffers: [Vec<Arc<dyn Buffer>>; ShaderStage::COUNT],
    pub shader_resources: [Vec<ShaderResourceSlot>; ShaderStage::COUNT],
    pub samplers: [Vec<SamplerSlot>; ShaderStage::COUNT],
    pub compute_uavs: Vec<UnorderedAccessSlot>,
}

impl MockDeviceContext {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            programs: Default::default(),
            constant_buffers: Default::default(),
            shader_resources: Default::default(),
            samplers: Default::default(),
            compute_uavs: Vec::new(),
        }
    }
}

impl DeviceContext for MockDeviceContext {
    fn set_program(&mut self, stage: ShaderStage, program: Option<&Arc<dyn Program>>) -> Result<()> {
        self.commands.push(format!("set_program {}", stage.name()));
        self.programs[stage.index()] = program.cloned();
        Ok(())
    }

    fn set_constant_buffers(&mut self, stage: ShaderStage, buffers: &[Arc<dyn Buffer>]) -> Result<()> {
        self.commands.push(format!("set_constant_buffers {} {}", stage.name(), buffers.len()));
        self.constant_buffers[stage.index()] = buffers.to_vec();
        Ok(())
    }

    fn set_shader_resources(&mut self, stage: ShaderStage, views: &[ShaderResourceSlot]) -> Result<()> {
        self.commands.push(format!("set_shader_resources {} {}", stage.name(), views.len()));
        self.shader_resources[stage.index()] = views.to_vec();
        Ok(())
    }

    fn set_samplers(&mut self, stage: ShaderStage, samplers: &[SamplerSlot]) -> Result<()> {
        self.commands.push(format!("set_samplers {} {}", stage.name(), samplers.len()));
        self.samplers[stage.index()] = samplers.to_vec();
        Ok(())
    }

    fn set_compute_unordered_access_views(&mut self, views: &[UnorderedAccessSlot]) -> Result<()> {
        self.commands.push(format!("set_compute_unordered_access_views {}", views.len()));
        self.compute_uavs = views.to_vec();
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_device_tests.rs"]
mod tests;
