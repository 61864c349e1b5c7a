use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use vigil_core::{PhoneNumber, StoreError, User, UserStore};

#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<PhoneNumber, User>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn read_user(&self, phone_number: &PhoneNumber) -> Result<User, StoreError> {
        let users = self.users.read().await;
        users
            .get(phone_number)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn write_user(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(user.phone_number()) {
            return Err(StoreError::AlreadyExists);
        }
        users.insert(user.phone_number().clone(), user);
        Ok(())
    }

    async fn update_user(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        let existing = users
            .get_mut(user.phone_number())
            .ok_or(StoreError::NotFound)?;

        *existing = user;
        Ok(())
    }

    async fn delete_user(&self, phone_number: &PhoneNumber) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        users.remove(phone_number).ok_or(StoreError::NotFound)?;
        Ok(())
    }
}
