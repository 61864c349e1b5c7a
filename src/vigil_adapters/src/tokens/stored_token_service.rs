use chrono::Utc;
use vigil_core::{AuthToken, PhoneNumber, StoreError, TokenService, TokenServiceError};

use super::TokenRecordStore;

/// Verifies tokens against records read from a [`TokenRecordStore`].
///
/// A token is valid for an identity when its record exists, names the same
/// phone number (after normalization), and has not expired. Unknown tokens are
/// simply invalid; any other store failure is reported as an error.
#[derive(Debug, Clone)]
pub struct StoredTokenService<S> {
    store: S,
}

impl<S> StoredTokenService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<S> TokenService for StoredTokenService<S>
where
    S: TokenRecordStore,
{
    #[tracing::instrument(name = "Verifying token", skip_all)]
    async fn verify(
        &self,
        token: &AuthToken,
        identity: &PhoneNumber,
    ) -> Result<bool, TokenServiceError> {
        let record = match self.store.read_token(token.expose()).await {
            Ok(record) => record,
            Err(StoreError::NotFound) => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        let owner = record.phone_number.trim_start_matches('+');
        let unexpired = record.expires > Utc::now().timestamp_millis();

        Ok(owner == identity.as_key() && unexpired)
    }
}
