use crate::error::{ClientError, DecodeError};
use crate::transport::RawResponse;
use brokerdefs_core::Definitions;
use serde::Deserialize;

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

pub fn encode_definitions(definitions: &Definitions) -> Result<Vec<u8>, ClientError> {
    serde_json::to_vec(definitions).map_err(ClientError::Encode)
}

/// Reads a backup response. Anything but 2xx cannot carry a document and is
/// reported with the `{"error", "reason"}` body the management API sends.
pub fn decode_definitions(response: &RawResponse) -> Result<Definitions, DecodeError> {
    if !response.is_success() {
        let body = serde_json::from_slice::<ErrorBody>(&response.body).unwrap_or_default();
        return Err(DecodeError::Status {
            status: response.status,
            error: body.error,
            reason: body.reason,
        });
    }
    serde_json::from_slice(&response.body).map_err(DecodeError::Json)
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod tests;
