/// Vertex input signature hashing
///
/// Two vertex stages with the same signature hash accept the same vertex
/// layouts.

use std::hash::{Hash, Hasher};
use rustc_hash::FxHasher;

use crate::compiler::SignatureParameter;

/// Mix `value` into `seed`
pub fn hash_combine(seed: &mut u64, value: u64) {
    *seed ^= value
        .wrapping_add(0x9e37_79b9)
        .wrapping_add(*seed << 6)
        .wrapping_add(*seed >> 2);
}

fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Hash of one signature entry
pub fn signature_parameter_hash(parameter: &SignatureParameter) -> u64 {
    let mut seed = hash_of(parameter.semantic_name.as_str());
    hash_combine(&mut seed, hash_of(&parameter.semantic_index));
    hash_combine(&mut seed, hash_of(&parameter.register));
    hash_combine(&mut seed, hash_of(&parameter.system_value));
    hash_combine(&mut seed, hash_of(&parameter.component_type));
    hash_combine(&mut seed, hash_of(&parameter.mask.bits()));
    hash_combine(&mut seed, hash_of(&parameter.read_write_mask.bits()));
    hash_combine(&mut seed, hash_of(&parameter.stream));
    seed
}

/// Order-sensitive hash of a whole input signature (0 when empty)
pub fn input_signature_hash(parameters: &[SignatureParameter]) -> u64 {
    let mut signature = 0;
    for parameter in parameters {
        hash_combine(&mut signature, signature_parameter_hash(parameter));
    }
    signature
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
