//! Digests del engine: blake3 en hex de 64 caracteres. Centralizado acá
//! para poder cambiar de algoritmo en un solo lugar.

use serde_json::Value;

use super::to_canonical_json;

/// Digest hex (64 caracteres) de un string.
pub fn hash_str(input: &str) -> String {
    blake3::hash(input.as_bytes()).to_hex().to_string()
}

/// Digest de un `Value` por su forma canónica. Mismo valor estructural,
/// mismo hash, sin importar el orden de claves.
pub fn hash_value(value: &Value) -> String {
    hash_str(&to_canonical_json(value))
}
