//! # Vigil - User Service Library
//!
//! Facade crate re-exporting the public APIs of the user service components.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! vigil = { path = "../vigil" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `PhoneNumber`, `Email`, `User`, `UserProfile`, etc.
//! - **Ports**: `UserStore`, `CheckStore`, `TokenService`, `PasswordHasher`
//! - **Use cases**: `CreateUserUseCase`, `DeleteUserUseCase`, etc.
//! - **Adapters**: `HashMapUserStore`, `FileRecordStore`, `Argon2Hasher`, etc.
//! - **Service**: `VigilService` - the HTTP entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use vigil_core::*;
}

pub use vigil_core::{
    AuthToken, Check, CheckId, Email, Name, Password, PasswordHash, Payload, PhoneNumber, User,
    UserProfile,
};

// ============================================================================
// Ports
// ============================================================================

pub use vigil_core::{
    CheckStore, Collection, HashError, PasswordHasher, StoreError, TokenService,
    TokenServiceError, UserStore,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use vigil_application::*;
}

pub use vigil_application::{
    CreateUserUseCase, DeleteUserUseCase, ReadUserUseCase, UpdateUserUseCase, UserOperationError,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    pub use vigil_adapters::{config, handlers, hashing, http, persistence, tokens};
}

pub use vigil_adapters::{
    handlers::{UsersState, dispatch_users, handle_users},
    hashing::Argon2Hasher,
    persistence::{FileRecordStore, HashMapCheckStore, HashMapUserStore},
    tokens::{HashMapTokenStore, StoredTokenService},
};

// ============================================================================
// Service (Main Entry Point)
// ============================================================================

pub use vigil_service::{VigilService, telemetry};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
