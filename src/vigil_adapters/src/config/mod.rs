pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AllowedOrigins, ApplicationSettings, DeleteSettings, HashingSettings, StorageBackend,
    StorageSettings, VigilSettings,
};
