//! HTTP implementation of the RPC client
//!
//! One POST per invocation against the provider's `/rpc/v1/{procedure}`
//! route. A 2xx body is the success payload; anything else is unwrapped to
//! the provider's `message` string and surfaced as `PlazaError::Rpc`.

use async_trait::async_trait;
use plaza_core::{PlazaError, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use url::Url;

use crate::{RpcClient, RpcConfig};

/// Error body the provider returns on failed calls
#[derive(Deserialize)]
struct RpcErrorBody {
    message: Option<String>,
}

/// RPC client over HTTPS
pub struct HttpRpcClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl HttpRpcClient {
    /// Create a client from configuration
    pub fn new(config: &RpcConfig) -> Result<Self> {
        // Url::join replaces the last path segment of a base without a
        // trailing slash, which would drop the endpoint's own path.
        let mut endpoint = config.endpoint.clone();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        let base_url = Url::parse(&endpoint).map_err(|e| {
            PlazaError::Configuration(format!("invalid endpoint {}: {}", config.endpoint, e))
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| PlazaError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    fn procedure_url(&self, procedure: &str) -> Result<Url> {
        self.base_url
            .join(&format!("rpc/v1/{}", procedure))
            .map_err(|e| PlazaError::Rpc(format!("invalid procedure name {}: {}", procedure, e)))
    }
}

#[async_trait]
impl RpcClient for HttpRpcClient {
    #[tracing::instrument(skip(self, args))]
    async fn invoke(&self, procedure: &str, args: JsonValue) -> Result<JsonValue> {
        let url = self.procedure_url(procedure)?;
        tracing::debug!(%url, "invoking remote procedure");

        let response = self
            .client
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&args)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "RPC transport failure");
                PlazaError::Rpc(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PlazaError::Rpc(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<RpcErrorBody>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or(body);
            tracing::warn!(%status, %message, "remote procedure returned an error");
            return Err(PlazaError::Rpc(message));
        }

        if body.is_empty() {
            return Ok(JsonValue::Null);
        }
        serde_json::from_str(&body).map_err(|e| {
            PlazaError::Rpc(format!("unparseable response from {}: {}", procedure, e))
        })
    }
}
