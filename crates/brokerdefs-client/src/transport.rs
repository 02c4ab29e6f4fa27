use std::sync::Arc;

/// A management API response exactly as the server sent it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: None,
            body: body.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("build http client failed: {0}")]
    Client(String),
    #[error("request `{method} {path}` failed: {reason}")]
    Request {
        method: String,
        path: String,
        reason: String,
    },
}

/// Issues requests against the management API. Paths are relative to the API
/// root (`/definitions`, `/definitions/%2F`) and already percent-encoded.
///
/// A non-2xx status is a successful call; only failures to obtain a response
/// are errors.
pub trait Transport: Send + Sync {
    fn get(&self, path: &str) -> Result<RawResponse, TransportError>;
    fn post_with_body(&self, path: &str, body: Vec<u8>) -> Result<RawResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn get(&self, path: &str) -> Result<RawResponse, TransportError> {
        (**self).get(path)
    }

    fn post_with_body(&self, path: &str, body: Vec<u8>) -> Result<RawResponse, TransportError> {
        (**self).post_with_body(path, body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, path: &str) -> Result<RawResponse, TransportError> {
        (**self).get(path)
    }

    fn post_with_body(&self, path: &str, body: Vec<u8>) -> Result<RawResponse, TransportError> {
        (**self).post_with_body(path, body)
    }
}
