use color_eyre::eyre::{Result, eyre};
use vigil::{
    Argon2Hasher, CheckStore, FileRecordStore, HashMapCheckStore, HashMapTokenStore,
    HashMapUserStore, PasswordHasher, StoredTokenService, TokenService, UserStore, UsersState,
    VigilService,
    adapters::config::{StorageBackend, VigilSettings},
    telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing().map_err(|e| eyre!("Failed to initialize tracing: {e}"))?;

    let settings = VigilSettings::load()?;
    let hasher = Argon2Hasher::new(settings.hashing.clone());

    match settings.storage.backend {
        StorageBackend::File => {
            let store = FileRecordStore::new(&settings.storage.data_dir);
            tracing::info!(data_dir = %store.root().display(), "Using file storage");
            let tokens = StoredTokenService::new(store.clone());
            serve(&settings, UsersState::new(store.clone(), store, tokens, hasher)).await
        }
        StorageBackend::Memory => {
            tracing::warn!(
                "Using in-memory storage: records are lost on shutdown and no tokens exist, \
                 so every request that needs a token answers 401. Set VIGIL__STORAGE__BACKEND=file \
                 to serve users and tokens from the data directory"
            );
            let tokens = StoredTokenService::new(HashMapTokenStore::new());
            let state = UsersState::new(
                HashMapUserStore::new(),
                HashMapCheckStore::new(),
                tokens,
                hasher,
            );
            serve(&settings, state).await
        }
    }
}

async fn serve<U, C, T, H>(settings: &VigilSettings, state: UsersState<U, C, T, H>) -> Result<()>
where
    U: UserStore + Clone + 'static,
    C: CheckStore + Clone + 'static,
    T: TokenService + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let state = state.with_check_timeout(settings.delete.check_timeout());
    let allowed_origins = settings.application.allowed_origins.clone();
    let allowed_origins = (!allowed_origins.is_empty()).then_some(allowed_origins);

    let listener = tokio::net::TcpListener::bind(settings.application.address()).await?;
    tracing::info!("Starting vigil service...");

    VigilService::new(state)
        .run_standalone(listener, allowed_origins)
        .await?;

    Ok(())
}
