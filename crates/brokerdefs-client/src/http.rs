use crate::codec::JSON_CONTENT_TYPE;
use crate::transport::{RawResponse, Transport, TransportError};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Where the management API lives and how to authenticate against it.
/// `base_url` is the API root, e.g. `http://localhost:15672/api`.
#[derive(Clone, PartialEq, Eq)]
pub struct ManagementEndpoint {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub timeout_ms: u64,
}

impl ManagementEndpoint {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, EndpointError> {
        let endpoint = Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        };
        endpoint.validate()?;
        Ok(endpoint)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Result<Self, EndpointError> {
        self.timeout_ms = timeout_ms;
        self.validate()?;
        Ok(self)
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn validate(&self) -> Result<(), EndpointError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(EndpointError::InvalidUrl(self.base_url.clone()));
        }
        if self.timeout_ms == 0 {
            return Err(EndpointError::InvalidTimeout(self.timeout_ms));
        }
        Ok(())
    }
}

impl fmt::Debug for ManagementEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagementEndpoint")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    #[error("invalid management url, expected http(s): {0}")]
    InvalidUrl(String),
    #[error("invalid timeout_ms, expected > 0: {0}")]
    InvalidTimeout(u64),
}

/// Blocking HTTP transport with basic auth. One client, and so one connection
/// pool, per transport.
#[derive(Debug)]
pub struct HttpTransport {
    endpoint: ManagementEndpoint,
    client: Client,
}

impl HttpTransport {
    pub fn new(endpoint: ManagementEndpoint) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(endpoint.timeout_ms))
            .build()
            .map_err(|error| TransportError::Client(error.to_string()))?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &ManagementEndpoint {
        &self.endpoint
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, TransportError> {
        let request_error = |reason: String| TransportError::Request {
            method: method.to_string(),
            path: path.to_string(),
            reason,
        };

        let mut request = self
            .client
            .request(method.clone(), self.endpoint.url_for(path))
            .basic_auth(&self.endpoint.username, Some(&self.endpoint.password));
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
        }

        let response = request.send().map_err(|error| request_error(describe(&error)))?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .map_err(|error| request_error(format!("read body: {}", describe(&error))))?;
        tracing::debug!(%method, path, status, bytes = body.len(), "management api response");

        Ok(RawResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str) -> Result<RawResponse, TransportError> {
        self.send(Method::GET, path, None)
    }

    fn post_with_body(&self, path: &str, body: Vec<u8>) -> Result<RawResponse, TransportError> {
        self.send(Method::POST, path, Some(body))
    }
}

fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("timed out: {error}")
    } else if error.is_connect() {
        format!("connect failed: {error}")
    } else {
        error.to_string()
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
