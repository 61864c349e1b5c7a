use std::time::Duration;

use axum::http::HeaderValue;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use super::constants::{
    CONFIGURATION_DIR, DEFAULT_ENVIRONMENT,
    env::{APP_ENVIRONMENT_ENV_VAR, ENV_PREFIX, ENV_SEPARATOR},
};

#[derive(Debug, Clone, Deserialize)]
pub struct VigilSettings {
    pub application: ApplicationSettings,
    pub storage: StorageSettings,
    pub delete: DeleteSettings,
    pub hashing: HashingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub data_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteSettings {
    pub check_timeout_ms: u64,
}

impl DeleteSettings {
    pub fn check_timeout(&self) -> Duration {
        Duration::from_millis(self.check_timeout_ms)
    }
}

/// Argon2 cost parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct HashingSettings {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingSettings {
    fn default() -> Self {
        Self {
            memory_kib: 15000,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Origins allowed to make cross-origin requests. Empty means CORS is off.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }
}

impl VigilSettings {
    /// Load settings from defaults, optional JSON files under
    /// `configuration/`, and `VIGIL__*` environment variables, in that order.
    ///
    /// A `.env` file is read first if present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = std::env::var(APP_ENVIRONMENT_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());

        Self::builder()?
            .add_source(File::with_name(&format!("{CONFIGURATION_DIR}/base")).required(false))
            .add_source(
                File::with_name(&format!("{CONFIGURATION_DIR}/{environment}")).required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("application.allowed_origins")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only. Used directly by tests.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let hashing = HashingSettings::default();

        Config::builder()
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 3000_i64)?
            .set_default("application.allowed_origins", Vec::<String>::new())?
            .set_default("storage.backend", "memory")?
            .set_default("storage.data_dir", ".data")?
            .set_default("delete.check_timeout_ms", 5000_i64)?
            .set_default("hashing.memory_kib", i64::from(hashing.memory_kib))?
            .set_default("hashing.iterations", i64::from(hashing.iterations))?
            .set_default("hashing.parallelism", i64::from(hashing.parallelism))
    }
}
