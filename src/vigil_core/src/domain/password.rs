use std::fmt;

use secrecy::Secret;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::{NEW_PASSWORD, UPDATED_PASSWORD};

/// A plaintext password that passed validation. Only ever handed to a hasher.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    /// Parses a password under the strength policy used at signup.
    pub fn parse_new(raw: Option<&Value>) -> Option<Self> {
        NEW_PASSWORD.apply(raw).map(|p| Self(Secret::new(p)))
    }

    /// Parses a password under the looser shape accepted by updates.
    pub fn parse_update(raw: Option<&Value>) -> Option<Self> {
        UPDATED_PASSWORD.apply(raw).map(|p| Self(Secret::new(p)))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// A password hash in PHC string format, as produced by a `PasswordHasher`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(hash: String) -> Self {
        Self(hash)
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash([REDACTED])")
    }
}
