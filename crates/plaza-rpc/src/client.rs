//! The RPC client trait

use async_trait::async_trait;
use plaza_core::Result;
use serde_json::Value as JsonValue;

/// Generic remote-procedure client.
///
/// One named procedure, one JSON argument object, one round-trip. The
/// provider's envelope is uniform: a success payload of whatever shape the
/// procedure produces, or an error with a message string only. No retries,
/// no caching; every call hits the remote.
#[async_trait]
pub trait RpcClient: Send + Sync {
    /// Invoke a remote procedure and return its payload
    async fn invoke(&self, procedure: &str, args: JsonValue) -> Result<JsonValue>;
}
