pub mod env {
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "APP_ENVIRONMENT";
    /// Prefix of environment overrides, e.g. `VIGIL__APPLICATION__PORT=8080`.
    pub const ENV_PREFIX: &str = "VIGIL";
    pub const ENV_SEPARATOR: &str = "__";
}

pub const CONFIGURATION_DIR: &str = "configuration";
pub const DEFAULT_ENVIRONMENT: &str = "local";

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
