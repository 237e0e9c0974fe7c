/// Graphics device trait, feature levels and device capabilities

use std::sync::Arc;
use crate::error::Result;
use crate::device::{Buffer, BufferDesc, Program, ProgramDesc, ShaderStage};

/// Hardware feature level reported by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureLevel {
    Level9_1,
    Level9_2,
    Level9_3,
    Level10_0,
    Level10_1,
    Level11_0,
}

impl FeatureLevel {
    /// Highest shader model (major version) supported at this level
    pub fn max_shader_model(self) -> u32 {
        match self {
            FeatureLevel::Level9_1 | FeatureLevel::Level9_2 | FeatureLevel::Level9_3 => 2,
            FeatureLevel::Level10_0 | FeatureLevel::Level10_1 => 4,
            FeatureLevel::Level11_0 => 5,
        }
    }

    /// True for the 9.x levels
    pub fn is_low(self) -> bool {
        self <= FeatureLevel::Level9_3
    }
}

/// Capabilities consulted when compiling a shader object
#[derive(Debug, Clone)]
pub struct DeviceCaps {
    /// Device feature level
    pub feature_level: FeatureLevel,
    /// Profile substituted for "auto", per stage (empty = stage unsupported)
    pub auto_profiles: [String; ShaderStage::COUNT],
}

impl DeviceCaps {
    /// Default capabilities for a feature level
    pub fn for_feature_level(feature_level: FeatureLevel) -> Self {
        let profiles: [&str; ShaderStage::COUNT] = match feature_level {
            FeatureLevel::Level11_0 => ["vs_5_0", "ps_5_0", "gs_5_0", "cs_5_0", "hs_5_0", "ds_5_0"],
            FeatureLevel::Level10_1 => ["vs_4_1", "ps_4_1", "gs_4_1", "cs_4_1", "", ""],
            FeatureLevel::Level10_0 => ["vs_4_0", "ps_4_0", "gs_4_0", "cs_4_0", "", ""],
            FeatureLevel::Level9_3 => ["vs_4_0_level_9_3", "ps_4_0_level_9_3", "", "", "", ""],
            FeatureLevel::Level9_1 | FeatureLevel::Level9_2 => {
                ["vs_4_0_level_9_1", "ps_4_0_level_9_1", "", "", "", ""]
            }
        };

        Self {
            feature_level,
            auto_profiles: profiles.map(|p| p.to_string()),
        }
    }

    /// Highest shader model supported by the device
    pub fn max_shader_model(&self) -> u32 {
        self.feature_level.max_shader_model()
    }

    /// Profile used when a shader description asks for "auto"
    pub fn auto_profile(&self, stage: ShaderStage) -> &str {
        &self.auto_profiles[stage.index()]
    }
}

/// Graphics device trait
///
/// Creates the GPU objects a shader object owns. Implemented by each backend.
pub trait GraphicsDevice: Send + Sync {
    /// Device capabilities
    fn caps(&self) -> &DeviceCaps;

    /// Create a buffer
    ///
    /// # Arguments
    ///
    /// * `desc` - Buffer descriptor
    ///
    /// # Returns
    ///
    /// A shared pointer to the created buffer
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>>;

    /// Create a program object from compiled bytecode
    ///
    /// # Arguments
    ///
    /// * `desc` - Program descriptor (stage, bytecode, stream-output layout)
    ///
    /// # Returns
    ///
    /// A shared pointer to the created program
    fn create_program(&mut self, desc: ProgramDesc) -> Result<Arc<dyn Program>>;
}
