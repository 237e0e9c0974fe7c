//! Unit tests for config.rs

use crate::config::BindingConfig;

#[test]
fn test_default_config() {
    let config = BindingConfig::default();

    assert_eq!(config.constant_buffer_alignment, 16);
    assert_eq!(config.low_feature_level_macros.len(), 1);
    assert_eq!(config.low_feature_level_macros[0].name, "BC5_AS_AG");
    assert!(config.extra_macros.is_empty());
    assert_eq!(config.diagnostic_context_lines, 2);
}

#[test]
fn test_aligned_constant_buffer_size() {
    let config = BindingConfig::default();

    assert_eq!(config.aligned_constant_buffer_size(0), 0);
    assert_eq!(config.aligned_constant_buffer_size(1), 16);
    assert_eq!(config.aligned_constant_buffer_size(16), 16);
    assert_eq!(config.aligned_constant_buffer_size(17), 32);
}

#[test]
fn test_zero_alignment_is_treated_as_one() {
    let config = BindingConfig { constant_buffer_alignment: 0, ..Default::default() };

    assert_eq!(config.aligned_constant_buffer_size(13), 13);
}
