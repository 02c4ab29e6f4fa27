use crate::transport::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("encode definitions failed: {0}")]
    Encode(#[source] serde_json::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("decode definitions failed: {0}")]
    Decode(#[from] DecodeError),
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("{0}")]
    Json(#[source] serde_json::Error),
    #[error("management api answered {status}{}", error_body_suffix(.error, .reason))]
    Status {
        status: u16,
        error: Option<String>,
        reason: Option<String>,
    },
}

fn error_body_suffix(error: &Option<String>, reason: &Option<String>) -> String {
    match (error, reason) {
        (Some(error), Some(reason)) => format!(": {error} ({reason})"),
        (Some(message), None) | (None, Some(message)) => format!(": {message}"),
        (None, None) => String::new(),
    }
}
