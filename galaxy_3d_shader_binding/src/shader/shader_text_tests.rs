//! Unit tests for shader_text.rs

use crate::device::{DeviceCaps, FeatureLevel, ShaderStage};
use crate::effect::{Effect, EffectDataType, EffectParameter, ShaderFragment};
use crate::shader::generate_shader_text;

fn material_effect() -> Effect {
    let mut effect = Effect::new("material");
    effect.add_macro("MAX_LIGHTS", "4");

    effect.add_parameter(EffectParameter::new("world", EffectDataType::Float4x4)).unwrap();
    effect.add_parameter(EffectParameter::new_array("lights", EffectDataType::Float4, 4)).unwrap();
    effect.add_parameter(EffectParameter::new("albedo", EffectDataType::Texture2D)).unwrap();
    effect
        .add_parameter(EffectParameter::new("output", EffectDataType::RwTexture2D).with_element_type("uint4"))
        .unwrap();
    effect.add_parameter(EffectParameter::new("raw", EffectDataType::ByteAddressBuffer)).unwrap();
    effect.add_parameter(EffectParameter::new("linear", EffectDataType::Sampler)).unwrap();
    effect.add_parameter(EffectParameter::new("layers", EffectDataType::Texture2DArray)).unwrap();
    effect.add_constant_buffer("per_object", &["world", "lights"]).unwrap();

    effect.add_shader_fragment(ShaderFragment::common("float4 helper() { return 0; }"));
    effect.add_shader_fragment(ShaderFragment::for_stage(
        ShaderStage::Pixel,
        "float4 PSMain() : SV_Target { return helper(); }",
    ));
    effect.add_shader_fragment(ShaderFragment::common("// tessellation helpers").with_min_shader_model(5));
    effect
}

fn text(effect: &Effect, stage: ShaderStage, level: FeatureLevel) -> String {
    generate_shader_text(effect, stage, &DeviceCaps::for_feature_level(level))
}

#[test]
fn test_full_text_at_level_11() {
    let expected = "#define MAX_LIGHTS 4\n\
        \n\
        cbuffer per_object\n\
        {\n\
        float4x4 world;\n\
        float4 lights[4];\n\
        };\n\
        Texture2D<float4> albedo;\n\
        RWTexture2D<uint4> output;\n\
        ByteAddressBuffer raw;\n\
        sampler linear;\n\
        Texture2DArray<float4> layers;\n\
        float4 helper() { return 0; }\n\
        float4 PSMain() : SV_Target { return helper(); }\n\
        // tessellation helpers\n";

    assert_eq!(text(&material_effect(), ShaderStage::Pixel, FeatureLevel::Level11_0), expected);
}

#[test]
fn test_stage_fragments_are_filtered() {
    let vertex = text(&material_effect(), ShaderStage::Vertex, FeatureLevel::Level11_0);

    assert!(vertex.contains("float4 helper()"));
    assert!(!vertex.contains("PSMain"));
}

#[test]
fn test_declarations_gated_by_shader_model() {
    let level_10 = text(&material_effect(), ShaderStage::Pixel, FeatureLevel::Level10_0);
    assert!(!level_10.contains("RWTexture2D"));
    assert!(level_10.contains("ByteAddressBuffer raw;"));
    assert!(level_10.contains("Texture2DArray<float4> layers;"));
    assert!(!level_10.contains("tessellation"));

    let level_9 = text(&material_effect(), ShaderStage::Pixel, FeatureLevel::Level9_3);
    assert!(level_9.contains("Texture2D<float4> albedo;"));
    assert!(level_9.contains("sampler linear;"));
    assert!(!level_9.contains("ByteAddressBuffer"));
    assert!(!level_9.contains("Texture2DArray"));
}

#[test]
fn test_empty_effect_text() {
    let effect = Effect::new("empty");
    assert_eq!(text(&effect, ShaderStage::Vertex, FeatureLevel::Level11_0), "\n");
}
