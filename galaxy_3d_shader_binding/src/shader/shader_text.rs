/// Shader source generation from an effect

use crate::device::{DeviceCaps, ShaderStage};
use crate::effect::Effect;

/// Full source text compiled for `stage`
///
/// Macro definitions, then one `cbuffer` block per constant buffer group,
/// then resource declarations the device supports, then the shader fragments
/// that apply to the stage.
pub fn generate_shader_text(effect: &Effect, stage: ShaderStage, caps: &DeviceCaps) -> String {
    let max_shader_model = caps.max_shader_model();
    let mut text = String::new();

    for shader_macro in effect.macros() {
        text.push_str(&format!("#define {} {}\n", shader_macro.name, shader_macro.value));
    }
    text.push('\n');

    for group in effect.constant_buffers() {
        text.push_str(&format!("cbuffer {}\n{{\n", group.name));
        for parameter in group.parameters.iter().filter_map(|&i| effect.parameter_by_index(i)) {
            let data_type = parameter.data_type();
            if data_type.is_resource() {
                continue;
            }
            text.push_str(&format!("{} {}", data_type.type_name(), parameter.name()));
            if let Some(size) = parameter.array_size() {
                text.push_str(&format!("[{}]", size));
            }
            text.push_str(";\n");
        }
        text.push_str("};\n");
    }

    for parameter in effect.parameters() {
        let data_type = parameter.data_type();
        if !data_type.is_resource() || max_shader_model < data_type.min_shader_model() {
            continue;
        }
        if data_type.has_element_type() {
            text.push_str(&format!(
                "{}<{}> {};\n",
                data_type.type_name(),
                parameter.element_type(),
                parameter.name()
            ));
        } else {
            text.push_str(&format!("{} {};\n", data_type.type_name(), parameter.name()));
        }
    }

    for fragment in effect.shader_fragments() {
        let stage_matches = fragment.stage.map_or(true, |s| s == stage);
        if stage_matches && max_shader_model >= fragment.min_shader_model {
            text.push_str(&fragment.source);
            text.push('\n');
        }
    }

    text
}

#[cfg(test)]
#[path = "shader_text_tests.rs"]
mod tests;
