//! Connection Handle
//!
//! A scoped connection to one remote endpoint. It is opened at the start
//! of an operation and released when dropped, whichever way the operation
//! ends.

use async_trait::async_trait;
use tonic::transport::Endpoint;

use crate::config::Config;
use crate::error::{KvError, Result};
use crate::protocol::rpc::{
    DeleteRangeRequest, DeleteRangeResponse, PutRequest, PutResponse, RangeRequest, RangeResponse,
};

use super::client::KvClient;
use super::service::KvService;

/// An open channel to the store
pub struct Connection {
    client: KvClient,

    /// Endpoint URI for logging
    endpoint: String,
}

impl Connection {
    /// Dial the configured endpoint
    ///
    /// Connect and per-request deadlines come from the config and are
    /// enforced by the transport.
    pub async fn open(config: &Config) -> Result<Self> {
        let uri = config.endpoint_uri()?;

        let mut endpoint =
            Endpoint::from_shared(uri.clone()).map_err(|e| KvError::InvalidEndpoint {
                endpoint: uri.clone(),
                reason: e.to_string(),
            })?;

        if let Some(timeout) = config.dial_timeout() {
            endpoint = endpoint.connect_timeout(timeout);
        }
        if let Some(timeout) = config.command_timeout() {
            endpoint = endpoint.timeout(timeout);
        }

        let channel = endpoint.connect().await.map_err(|e| {
            tracing::debug!("Failed to connect to {}: {}", uri, e);
            KvError::from(e)
        })?;

        tracing::debug!("Connected to {}", uri);

        Ok(Self {
            client: KvClient::new(channel),
            endpoint: uri,
        })
    }

    /// Get the endpoint URI
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        tracing::trace!("Releasing connection to {}", self.endpoint);
    }
}

#[async_trait]
impl KvService for Connection {
    async fn put(&mut self, request: PutRequest) -> Result<PutResponse> {
        tracing::trace!("Put -> {}: {:?}", self.endpoint, request);
        let response = self.client.put(request).await?;
        Ok(response.into_inner())
    }

    async fn range(&mut self, request: RangeRequest) -> Result<RangeResponse> {
        tracing::trace!("Range -> {}: {:?}", self.endpoint, request);
        let response = self.client.range(request).await?;
        Ok(response.into_inner())
    }

    async fn delete_range(&mut self, request: DeleteRangeRequest) -> Result<DeleteRangeResponse> {
        tracing::trace!("DeleteRange -> {}: {:?}", self.endpoint, request);
        let response = self.client.delete_range(request).await?;
        Ok(response.into_inner())
    }
}
