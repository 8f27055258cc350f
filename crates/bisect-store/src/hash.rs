use bisect_core::errors::BisectError;
use bisect_core::to_canonical_json_bytes;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Stable hexadecimal SHA-256 of a serializable value's canonical JSON.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, BisectError> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(hex::encode(Sha256::digest(bytes)))
}

/// Fingerprint of an object list, used to tie reports to their inputs.
pub fn objects_hash(objects: &[i64]) -> Result<String, BisectError> {
    stable_hash_string(&objects)
}
