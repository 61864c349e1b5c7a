use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    auth_token::AuthToken,
    password::{Password, PasswordHash},
    phone_number::PhoneNumber,
};

use super::repositories::StoreError;

#[derive(Debug, Error)]
pub enum TokenServiceError {
    #[error("Token store error: {0}")]
    StoreError(#[from] StoreError),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Port trait for the token verification service
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Whether `token` currently belongs to `identity`.
    async fn verify(
        &self,
        token: &AuthToken,
        identity: &PhoneNumber,
    ) -> Result<bool, TokenServiceError>;
}

#[derive(Debug, Error)]
pub enum HashError {
    #[error("Failed to hash password: {0}")]
    HashFailed(String),
}

/// Port trait for the credential hashing primitive
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: Password) -> Result<PasswordHash, HashError>;
}
