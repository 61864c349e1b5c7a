use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHasher as _, SaltString, rand_core},
};
use secrecy::ExposeSecret;
use vigil_core::{HashError, Password, PasswordHash, PasswordHasher};

use crate::config::HashingSettings;

/// Argon2id hasher. Hashing runs on the blocking pool so it never stalls the
/// async workers.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    settings: HashingSettings,
}

impl Argon2Hasher {
    pub fn new(settings: HashingSettings) -> Self {
        Self { settings }
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new(HashingSettings::default())
    }
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2Hasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: Password) -> Result<PasswordHash, HashError> {
        let current_span: tracing::Span = tracing::Span::current();
        let settings = self.settings.clone();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                let params = Params::new(
                    settings.memory_kib,
                    settings.iterations,
                    settings.parallelism,
                    None,
                )
                .map_err(|e| HashError::HashFailed(e.to_string()))?;

                Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|hash| PasswordHash::new(hash.to_string()))
                    .map_err(|e| HashError::HashFailed(e.to_string()))
            })
        })
        .await
        .map_err(|e| HashError::HashFailed(e.to_string()))?;

        result
    }
}
