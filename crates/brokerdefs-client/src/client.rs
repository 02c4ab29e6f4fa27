use crate::codec::{decode_definitions, encode_definitions};
use crate::error::ClientError;
use crate::http::{HttpTransport, ManagementEndpoint};
use crate::path::definitions_path;
use crate::transport::{RawResponse, Transport, TransportError};
use brokerdefs_core::Definitions;

/// Backs up and restores broker definitions through a [`Transport`].
///
/// Each call is a single request. Nothing is retried or cached, so one client
/// can be shared between threads freely.
pub struct DefinitionsClient {
    transport: Box<dyn Transport>,
}

impl DefinitionsClient {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn http(endpoint: ManagementEndpoint) -> Result<Self, TransportError> {
        Ok(Self::new(Box::new(HttpTransport::new(endpoint)?)))
    }

    /// `GET /definitions`.
    ///
    /// On error, `unwrap_or_default()` yields the empty document.
    pub fn backup_all(&self) -> Result<Definitions, ClientError> {
        self.backup(None)
    }

    /// `GET /definitions/{vhost}`.
    pub fn backup_vhost(&self, vhost: &str) -> Result<Definitions, ClientError> {
        self.backup(Some(vhost))
    }

    /// `POST /definitions`. The response comes back as sent, whatever its status.
    pub fn restore_all(&self, definitions: &Definitions) -> Result<RawResponse, ClientError> {
        self.restore(definitions, None)
    }

    /// `POST /definitions/{vhost}`.
    pub fn restore_vhost(
        &self,
        definitions: &Definitions,
        vhost: &str,
    ) -> Result<RawResponse, ClientError> {
        self.restore(definitions, Some(vhost))
    }

    fn backup(&self, vhost: Option<&str>) -> Result<Definitions, ClientError> {
        let path = definitions_path(vhost);
        tracing::debug!(method = "GET", path = %path, "backup definitions");
        let response = self.transport.get(&path)?;
        if !response.is_success() {
            tracing::warn!(path = %path, status = response.status, "backup answered with error status");
        }
        Ok(decode_definitions(&response)?)
    }

    fn restore(
        &self,
        definitions: &Definitions,
        vhost: Option<&str>,
    ) -> Result<RawResponse, ClientError> {
        let body = encode_definitions(definitions)?;
        let path = definitions_path(vhost);
        tracing::debug!(method = "POST", path = %path, bytes = body.len(), "restore definitions");
        let response = self.transport.post_with_body(&path, body)?;
        tracing::debug!(path = %path, status = response.status, "restore answered");
        Ok(response)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
