use crate::definitions::Definitions;
use crate::stable_json::{stable_json_bytes, StableJsonOptions};
use sha2::{Digest, Sha256};

const VERSION_KEYS: [&str; 2] = ["rabbit_version", "broker_version"];

/// Hex SHA-256 of the canonical document, independent of key order and of the
/// exporting broker's version string.
pub fn definitions_fingerprint(definitions: &Definitions) -> serde_json::Result<String> {
    let value = serde_json::to_value(definitions)?;
    let options = StableJsonOptions {
        ignore_root_keys: VERSION_KEYS.iter().map(|key| key.to_string()).collect(),
    };
    let bytes = stable_json_bytes(&value, &options)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{digest:x}"))
}

#[cfg(test)]
#[path = "fingerprint_test.rs"]
mod tests;
