/// Device context trait - draw-time state attachment

use std::sync::Arc;
use crate::error::Result;
use crate::device::{
    Buffer, Program, ShaderStage,
    ShaderResourceSlot, SamplerSlot, UnorderedAccessSlot,
};

/// Immediate context the bind driver records into
///
/// All slot arrays start at slot 0 and are attached in one call.
pub trait DeviceContext {
    /// Attach a program to a stage (`None` detaches the stage)
    fn set_program(&mut self, stage: ShaderStage, program: Option<&Arc<dyn Program>>) -> Result<()>;

    /// Attach constant buffers to a stage
    fn set_constant_buffers(&mut self, stage: ShaderStage, buffers: &[Arc<dyn Buffer>]) -> Result<()>;

    /// Attach shader resource views to a stage
    fn set_shader_resources(&mut self, stage: ShaderStage, views: &[ShaderResourceSlot]) -> Result<()>;

    /// Attach samplers to a stage
    fn set_samplers(&mut self, stage: ShaderStage, samplers: &[SamplerSlot]) -> Result<()>;

    /// Attach unordered access views to the compute stage, without counter reset
    fn set_compute_unordered_access_views(&mut self, views: &[UnorderedAccessSlot]) -> Result<()>;
}
