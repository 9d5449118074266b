pub mod client;
pub mod graphql;
pub mod rest;
pub mod types;

use crate::error::Result;
use crate::form::FieldTuple;
use async_trait::async_trait;
use serde_json::Value;

/// Resolves a complete field tuple to a JSON payload.
///
/// `Err` means the call itself failed (network, TLS, decoding). Error bodies
/// that GitHub returns are `Ok` payloads and get classified downstream.
#[async_trait]
pub trait BranchLookup: Send + Sync {
    async fn lookup(&self, tuple: &FieldTuple) -> Result<Value>;
}
