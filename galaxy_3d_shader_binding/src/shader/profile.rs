/// Profile resolution, stage gating and compile macros

use crate::compiler::ShaderMacro;
use crate::config::BindingConfig;
use crate::device::{DeviceCaps, ShaderStage};

/// Profile keyword replaced by the device's own profile for the stage
pub const AUTO_PROFILE: &str = "auto";

/// Macro always defined when compiling for constant-buffer targets
pub const CONSTANT_BUFFER_MACRO: &str = "CONSTANT_BUFFER";

/// Minimum shader model needed to run `stage` at all
pub fn stage_min_shader_model(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex | ShaderStage::Pixel => 0,
        ShaderStage::Geometry | ShaderStage::Compute => 4,
        ShaderStage::Hull | ShaderStage::Domain => 5,
    }
}

/// Profile to compile `stage` with, or `None` if the device cannot run it
///
/// `requested` must not be empty (an empty profile means the stage is absent).
pub fn resolve_profile(stage: ShaderStage, requested: &str, caps: &DeviceCaps) -> Option<String> {
    let max_shader_model = caps.max_shader_model();
    if max_shader_model < stage_min_shader_model(stage) {
        return None;
    }

    let profile = if requested == AUTO_PROFILE {
        caps.auto_profile(stage)
    } else {
        requested
    };
    if profile.is_empty() {
        return None;
    }
    if stage == ShaderStage::Compute && profile == "cs_5_0" && max_shader_model < 5 {
        return None;
    }

    Some(profile.to_string())
}

/// Macros passed to every compilation on this device
pub fn compile_macros(caps: &DeviceCaps, config: &BindingConfig) -> Vec<ShaderMacro> {
    let mut macros = vec![
        ShaderMacro::new(CONSTANT_BUFFER_MACRO, "1"),
        ShaderMacro::new(&config.backend_macro, "1"),
    ];
    if caps.feature_level.is_low() {
        macros.extend(config.low_feature_level_macros.iter().cloned());
    }
    macros.extend(config.extra_macros.iter().cloned());
    macros
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
