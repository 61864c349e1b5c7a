//! Use cases for the user resource.
//!
//! Every use case validates its own input, authorizes the caller where the
//! operation requires it, and then talks to the stores through the ports
//! defined in `vigil_core`. All of them report failures as a
//! [`UserOperationError`].

pub mod error;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{UserOperationError, messages};
pub use use_cases::{
    authorize::AuthorizationGate,
    create_user::CreateUserUseCase,
    delete_user::{CheckDeletion, DEFAULT_CHECK_TIMEOUT, DeleteUserUseCase},
    read_user::ReadUserUseCase,
    update_user::UpdateUserUseCase,
};
