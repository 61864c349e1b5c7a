//! Token verification backed by stored token records.
//!
//! Tokens are issued elsewhere; this module only reads them. A record binds a
//! token id to a phone number until an expiry instant.

pub mod hashmap_token_store;
pub mod stored_token_service;

pub use hashmap_token_store::HashMapTokenStore;
pub use stored_token_service::StoredTokenService;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vigil_core::StoreError;

/// A token as kept in the `tokens` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    pub id: String,
    pub phone_number: String,
    /// Expiry as milliseconds since the unix epoch.
    pub expires: i64,
}

#[async_trait]
pub trait TokenRecordStore: Send + Sync {
    async fn read_token(&self, id: &str) -> Result<TokenRecord, StoreError>;
}
