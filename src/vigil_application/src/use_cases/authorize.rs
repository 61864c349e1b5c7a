use vigil_core::{AuthToken, PhoneNumber, TokenService};

use crate::error::UserOperationError;

/// Decides whether the bearer of a token may act on an identity.
///
/// Malformed tokens are rejected locally and never reach the token service.
/// Verification errors count as a denial; nothing is retried.
#[derive(Clone)]
pub struct AuthorizationGate<T> {
    token_service: T,
}

impl<T> AuthorizationGate<T>
where
    T: TokenService,
{
    pub fn new(token_service: T) -> Self {
        Self { token_service }
    }

    #[tracing::instrument(name = "AuthorizationGate::authorize", skip(self, token))]
    pub async fn authorize(&self, token: Option<&str>, identity: &PhoneNumber) -> bool {
        let Some(token) = AuthToken::parse(token) else {
            tracing::debug!("Rejected malformed or missing token");
            return false;
        };

        match self.token_service.verify(&token, identity).await {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!(error = %e, "Token verification failed");
                false
            }
        }
    }

    /// Like [`authorize`](Self::authorize), as a `Result` suited to `?`.
    pub async fn require(
        &self,
        token: Option<&str>,
        identity: &PhoneNumber,
    ) -> Result<(), UserOperationError> {
        if self.authorize(token, identity).await {
            Ok(())
        } else {
            Err(UserOperationError::Unauthorized)
        }
    }
}
