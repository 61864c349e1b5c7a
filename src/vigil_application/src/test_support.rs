//! In-memory doubles for the ports, with call counters for assertions.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use serde_json::json;
use tokio::sync::RwLock;
use vigil_core::{
    AuthToken, Check, CheckId, CheckStore, Email, HashError, Name, Password, PasswordHash,
    PasswordHasher, Payload, PhoneNumber, StoreError, TokenService, TokenServiceError, User,
    UserStore,
};

pub const VALID_TOKEN: &str = "abcdefghij0123456789";

pub fn phone(raw: &str) -> PhoneNumber {
    PhoneNumber::parse(Some(&json!(raw))).unwrap()
}

pub fn identity_payload(phone_number: &str) -> Payload {
    [("phoneNumber", json!(phone_number))].into_iter().collect()
}

pub fn create_payload(phone_number: &str) -> Payload {
    [
        ("phoneNumber", json!(phone_number)),
        ("email", json!("jane@example.com")),
        ("firstName", json!("Jane")),
        ("lastName", json!("Doe")),
        ("password", json!("Passw0rd!")),
        ("tosAgreement", json!(true)),
    ]
    .into_iter()
    .collect()
}

pub fn stored_user(phone_number: &str, checks: &[&str]) -> User {
    User::new(
        phone(phone_number),
        Email::parse(Some(&json!("jane@example.com"))).unwrap(),
        Name::parse_first(Some(&json!("Jane"))).unwrap(),
        Name::parse_last(Some(&json!("Doe"))).unwrap(),
        PasswordHash::new("hashed:Passw0rd!".to_string()),
    )
    .with_checks(checks.iter().map(|id| CheckId::new(*id)).collect())
}

#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
    reads: Arc<AtomicUsize>,
    mutations: Arc<AtomicUsize>,
    failing_reads: bool,
    failing_writes: bool,
    failing_deletes: bool,
}

impl MockUserStore {
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.phone_number().as_key().to_string(), user))
            .collect();
        Self {
            users: Arc::new(RwLock::new(users)),
            ..Default::default()
        }
    }

    pub fn with_failing_reads(mut self) -> Self {
        self.failing_reads = true;
        self
    }

    pub fn with_failing_writes(mut self) -> Self {
        self.failing_writes = true;
        self
    }

    pub fn with_failing_deletes(mut self) -> Self {
        self.failing_deletes = true;
        self
    }

    pub async fn get(&self, key: &str) -> Option<User> {
        self.users.read().await.get(key).cloned()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn mutations(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl UserStore for MockUserStore {
    async fn read_user(&self, phone_number: &PhoneNumber) -> Result<User, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.failing_reads {
            return Err(StoreError::UnexpectedError("disk on fire".to_string()));
        }
        self.get(phone_number.as_key())
            .await
            .ok_or(StoreError::NotFound)
    }

    async fn write_user(&self, user: User) -> Result<(), StoreError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        if self.failing_writes {
            return Err(StoreError::UnexpectedError("disk on fire".to_string()));
        }
        let mut users = self.users.write().await;
        let key = user.phone_number().as_key().to_string();
        if users.contains_key(&key) {
            return Err(StoreError::AlreadyExists);
        }
        users.insert(key, user);
        Ok(())
    }

    async fn update_user(&self, user: User) -> Result<(), StoreError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        if self.failing_writes {
            return Err(StoreError::UnexpectedError("disk on fire".to_string()));
        }
        let mut users = self.users.write().await;
        let existing = users
            .get_mut(user.phone_number().as_key())
            .ok_or(StoreError::NotFound)?;
        *existing = user;
        Ok(())
    }

    async fn delete_user(&self, phone_number: &PhoneNumber) -> Result<(), StoreError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        if self.failing_deletes {
            return Err(StoreError::UnexpectedError("disk on fire".to_string()));
        }
        self.users
            .write()
            .await
            .remove(phone_number.as_key())
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[derive(Clone, Default)]
pub struct MockCheckStore {
    checks: Arc<RwLock<HashMap<String, Check>>>,
    failing_deletes: Arc<HashSet<String>>,
    stalled: Arc<HashSet<String>>,
    staggered: bool,
    reads: Arc<AtomicUsize>,
    deletes: Arc<AtomicUsize>,
    completed_deletes: Arc<AtomicUsize>,
}

impl MockCheckStore {
    pub fn with_checks<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let checks = ids
            .into_iter()
            .map(|id| (id.to_string(), Check::new(CheckId::new(id))))
            .collect();
        Self {
            checks: Arc::new(RwLock::new(checks)),
            ..Default::default()
        }
    }

    pub fn failing_delete(mut self, id: &str) -> Self {
        Arc::make_mut(&mut self.failing_deletes).insert(id.to_string());
        self
    }

    /// Deleting `id` never completes.
    pub fn stalling(mut self, id: &str) -> Self {
        Arc::make_mut(&mut self.stalled).insert(id.to_string());
        self
    }

    /// Deletes sleep for a length derived from the id, so they finish out of
    /// submission order.
    pub fn with_staggered_deletes(mut self) -> Self {
        self.staggered = true;
        self
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.checks.read().await.contains_key(id)
    }

    pub async fn is_empty(&self) -> bool {
        self.checks.read().await.is_empty()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn completed_deletes(&self) -> usize {
        self.completed_deletes.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CheckStore for MockCheckStore {
    async fn read_check(&self, id: &CheckId) -> Result<Check, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.checks
            .read()
            .await
            .get(id.as_ref())
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn delete_check(&self, id: &CheckId) -> Result<(), StoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.stalled.contains(id.as_ref()) {
            std::future::pending::<()>().await;
        }
        if self.staggered {
            let jitter = id.as_ref().bytes().map(u64::from).sum::<u64>() % 7;
            tokio::time::sleep(Duration::from_millis(jitter * 3)).await;
        }
        if self.failing_deletes.contains(id.as_ref()) {
            return Err(StoreError::UnexpectedError("disk on fire".to_string()));
        }
        self.checks
            .write()
            .await
            .remove(id.as_ref())
            .ok_or(StoreError::NotFound)?;
        self.completed_deletes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Clone)]
pub struct MockTokenService {
    outcome: Result<bool, ()>,
    calls: Arc<AtomicUsize>,
}

impl MockTokenService {
    fn new(outcome: Result<bool, ()>) -> Self {
        Self {
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn accepting() -> Self {
        Self::new(Ok(true))
    }

    pub fn rejecting() -> Self {
        Self::new(Ok(false))
    }

    pub fn failing() -> Self {
        Self::new(Err(()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TokenService for MockTokenService {
    async fn verify(
        &self,
        _token: &AuthToken,
        _identity: &PhoneNumber,
    ) -> Result<bool, TokenServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome
            .map_err(|_| TokenServiceError::UnexpectedError("token service down".to_string()))
    }
}

#[derive(Clone, Default)]
pub struct MockHasher {
    failing: bool,
}

impl MockHasher {
    pub fn failing() -> Self {
        Self { failing: true }
    }
}

#[async_trait::async_trait]
impl PasswordHasher for MockHasher {
    async fn hash(&self, password: Password) -> Result<PasswordHash, HashError> {
        use secrecy::ExposeSecret;

        if self.failing {
            return Err(HashError::HashFailed("out of memory".to_string()));
        }
        Ok(PasswordHash::new(format!(
            "hashed:{}",
            password.as_ref().expose_secret()
        )))
    }
}
