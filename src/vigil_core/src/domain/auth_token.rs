use secrecy::{ExposeSecret, Secret};

use crate::validation::AUTH_TOKEN;

/// A well-formed bearer token taken from the `authorization` header.
///
/// Well-formed only means the shape is right; whether the token belongs to an
/// identity is for the token service to decide.
#[derive(Debug, Clone)]
pub struct AuthToken(Secret<String>);

impl AuthToken {
    pub fn parse(header: Option<&str>) -> Option<Self> {
        AUTH_TOKEN.apply_str(header).map(|token| Self(Secret::new(token)))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}
