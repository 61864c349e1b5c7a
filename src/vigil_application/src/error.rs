use thiserror::Error;

/// Public messages carried by [`UserOperationError`]. Store and hashing
/// details never end up in these.
pub mod messages {
    pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";
    pub const NOTHING_TO_UPDATE: &str = "Nothing to update";
    pub const HASH_FAILED: &str = "Could not hash the user's password";
    pub const CREATE_FAILED: &str = "Could not create the new user";
    pub const READ_FAILED: &str = "Could not read the user";
    pub const UPDATE_FAILED: &str = "Could not update user";
    pub const DELETE_USER_FAILED: &str = "Error deleting user";
    pub const DELETE_CHECKS_FAILED: &str = "Error deleting checks";
    pub const USER_DELETED: &str = "User deleted";
}

/// Every way a user operation can fail, each mapped to one status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserOperationError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Invalid token")]
    Unauthorized,

    #[error("User not found")]
    NotFound,

    #[error("User already exists")]
    Conflict,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Internal(&'static str),
}

impl UserOperationError {
    pub fn status_code(&self) -> u16 {
        match self {
            UserOperationError::Validation(_) => 400,
            UserOperationError::Unauthorized => 401,
            UserOperationError::NotFound => 404,
            UserOperationError::MethodNotAllowed => 405,
            UserOperationError::Conflict => 409,
            UserOperationError::Internal(_) => 500,
        }
    }
}
