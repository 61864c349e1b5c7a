use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use vigil_core::{Check, CheckId, CheckStore, StoreError};

#[derive(Default, Clone)]
pub struct HashMapCheckStore {
    checks: Arc<RwLock<HashMap<CheckId, Check>>>,
}

impl HashMapCheckStore {
    pub fn new() -> Self {
        Self {
            checks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Checks are created elsewhere; this only seeds the in-memory store.
    pub async fn insert(&self, check: Check) {
        self.checks.write().await.insert(check.id.clone(), check);
    }
}

#[async_trait::async_trait]
impl CheckStore for HashMapCheckStore {
    async fn read_check(&self, id: &CheckId) -> Result<Check, StoreError> {
        let checks = self.checks.read().await;
        checks.get(id).cloned().ok_or(StoreError::NotFound)
    }

    async fn delete_check(&self, id: &CheckId) -> Result<(), StoreError> {
        let mut checks = self.checks.write().await;
        checks.remove(id).ok_or(StoreError::NotFound)?;
        Ok(())
    }
}
