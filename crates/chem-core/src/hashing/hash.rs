//! Digest blake3 de las huellas de lote.

/// Digest hex (64 caracteres) de un texto ya canonicalizado.
pub fn hash_str(canonical: &str) -> String {
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}
