pub mod domain;
pub mod http_abstraction;
pub mod ports;
pub mod validation;

// Re-export commonly used types for convenience
pub use domain::{
    auth_token::AuthToken,
    check::{Check, CheckId},
    email::Email,
    name::Name,
    password::{Password, PasswordHash},
    payload::Payload,
    phone_number::PhoneNumber,
    user::{User, UserProfile},
};

pub use ports::{
    repositories::{CheckStore, Collection, StoreError, UserStore},
    services::{HashError, PasswordHasher, TokenService, TokenServiceError},
};

pub use http_abstraction::{
    CallbackResponder, RequestData, ResponseBuilder, ResponseHelpers, UserRequest,
};
