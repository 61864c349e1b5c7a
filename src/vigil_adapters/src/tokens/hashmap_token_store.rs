use std::sync::Arc;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use rand::{Rng, distr::Alphanumeric};
use vigil_core::{PhoneNumber, StoreError};

use super::{TokenRecord, TokenRecordStore};

/// Length of the tokens handed out by [`HashMapTokenStore::issue`].
pub const TOKEN_LENGTH: usize = 20;

#[derive(Debug, Default, Clone)]
pub struct HashMapTokenStore {
    tokens: Arc<DashMap<String, TokenRecord>>,
}

impl HashMapTokenStore {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(DashMap::new()),
        }
    }

    pub fn insert(&self, record: TokenRecord) {
        self.tokens.insert(record.id.clone(), record);
    }

    /// Seeds a fresh random token for `phone_number`, valid for `ttl`.
    pub fn issue(&self, phone_number: &PhoneNumber, ttl: Duration) -> TokenRecord {
        let id: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();

        let record = TokenRecord {
            id,
            phone_number: phone_number.as_key().to_string(),
            expires: (Utc::now() + ttl).timestamp_millis(),
        };
        self.insert(record.clone());
        record
    }
}

#[async_trait::async_trait]
impl TokenRecordStore for HashMapTokenStore {
    async fn read_token(&self, id: &str) -> Result<TokenRecord, StoreError> {
        self.tokens
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::NotFound)
    }
}
