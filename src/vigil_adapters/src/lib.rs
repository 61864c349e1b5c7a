//! Infrastructure for the user service: stores, token verification, password
//! hashing, configuration, and the transport-facing users handler.

pub mod config;
pub mod handlers;
pub mod hashing;
pub mod http;
pub mod persistence;
pub mod tokens;
