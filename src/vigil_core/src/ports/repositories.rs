use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    check::{Check, CheckId},
    phone_number::PhoneNumber,
    user::User,
};

/// Named partitions of the record store. Ids are unique within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Checks,
    Tokens,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Checks => "checks",
            Collection::Tokens => "tokens",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Record store errors, shared by every collection
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,
    #[error("Record already exists")]
    AlreadyExists,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for StoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::NotFound, Self::NotFound)
                | (Self::AlreadyExists, Self::AlreadyExists)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Port over the `users` collection, keyed by the normalized phone number.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn read_user(&self, phone_number: &PhoneNumber) -> Result<User, StoreError>;
    /// Persists a new record. Fails with `AlreadyExists` if the key is taken.
    async fn write_user(&self, user: User) -> Result<(), StoreError>;
    /// Replaces an existing record. Fails with `NotFound` if the key is free.
    async fn update_user(&self, user: User) -> Result<(), StoreError>;
    async fn delete_user(&self, phone_number: &PhoneNumber) -> Result<(), StoreError>;
}

/// Port over the `checks` collection.
#[async_trait]
pub trait CheckStore: Send + Sync {
    async fn read_check(&self, id: &CheckId) -> Result<Check, StoreError>;
    async fn delete_check(&self, id: &CheckId) -> Result<(), StoreError>;
}
