use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tokio::{fs, io::AsyncWriteExt};
use vigil_core::{Check, CheckId, CheckStore, Collection, PhoneNumber, StoreError, User, UserStore};

use crate::tokens::{TokenRecord, TokenRecordStore};

/// Flat record store keeping one JSON document per record.
///
/// Records live at `<root>/<collection>/<id>.json`. Writes only create new
/// files and updates only replace existing ones, so the two can never be
/// confused for each other.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    root: Arc<PathBuf>,
}

impl FileRecordStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.as_str())
    }

    fn record_path(&self, collection: Collection, id: &str) -> Result<PathBuf, StoreError> {
        let is_plain_name = !id.is_empty()
            && id != "."
            && id != ".."
            && !id.contains(['/', '\\'])
            && !id.contains('\0');
        if !is_plain_name {
            return Err(StoreError::UnexpectedError(format!(
                "invalid record id {id:?}"
            )));
        }
        Ok(self.collection_dir(collection).join(format!("{id}.json")))
    }

    #[tracing::instrument(name = "FileRecordStore::read", skip(self))]
    pub async fn read<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<T, StoreError> {
        let path = self.record_path(collection, id)?;
        let bytes = fs::read(&path).await.map_err(map_io_error)?;

        serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::UnexpectedError(format!("corrupt record {path:?}: {e}")))
    }

    /// Creates a new record. Fails with `AlreadyExists` if the id is taken.
    ///
    /// The record is staged in a temp file and hard-linked into place, so a
    /// reader never sees a partially written document.
    #[tracing::instrument(name = "FileRecordStore::write", skip(self, record))]
    pub async fn write<T: Serialize>(
        &self,
        record: &T,
        collection: Collection,
        id: &str,
    ) -> Result<(), StoreError> {
        let path = self.record_path(collection, id)?;
        let bytes = to_bytes(record)?;

        fs::create_dir_all(self.collection_dir(collection))
            .await
            .map_err(map_io_error)?;

        let staged = self.stage(collection, id, &bytes).await?;
        let linked = fs::hard_link(&staged, &path).await;
        remove_staged(&staged).await;

        linked.map_err(map_io_error)
    }

    /// Replaces an existing record. Fails with `NotFound` if there is none.
    ///
    /// The new document is staged in a temp file and renamed over the old one,
    /// so concurrent readers see either the old or the new record in full.
    #[tracing::instrument(name = "FileRecordStore::update", skip(self, record))]
    pub async fn update<T: Serialize>(
        &self,
        record: &T,
        collection: Collection,
        id: &str,
    ) -> Result<(), StoreError> {
        let path = self.record_path(collection, id)?;
        let bytes = to_bytes(record)?;

        fs::metadata(&path).await.map_err(map_io_error)?;

        let staged = self.stage(collection, id, &bytes).await?;
        if let Err(e) = fs::rename(&staged, &path).await {
            remove_staged(&staged).await;
            return Err(map_io_error(e));
        }
        Ok(())
    }

    /// Writes `bytes` to a uniquely named temp file next to the record.
    async fn stage(
        &self,
        collection: Collection,
        id: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StoreError> {
        let staged = self
            .collection_dir(collection)
            .join(format!(".{id}.{}.tmp", uuid::Uuid::new_v4()));

        let result: std::io::Result<()> = async {
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&staged)
                .await?;
            file.write_all(bytes).await?;
            file.sync_all().await
        }
        .await;

        match result {
            Ok(()) => Ok(staged),
            Err(e) => {
                remove_staged(&staged).await;
                Err(StoreError::UnexpectedError(e.to_string()))
            }
        }
    }

    #[tracing::instrument(name = "FileRecordStore::delete", skip(self))]
    pub async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let path = self.record_path(collection, id)?;
        fs::remove_file(&path).await.map_err(map_io_error)
    }
}

async fn remove_staged(staged: &Path) {
    if let Err(e) = fs::remove_file(staged).await {
        if e.kind() != ErrorKind::NotFound {
            tracing::warn!(error = %e, path = ?staged, "Failed to remove staged record");
        }
    }
}

fn to_bytes<T: Serialize>(record: &T) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(record).map_err(|e| StoreError::UnexpectedError(e.to_string()))
}

fn map_io_error(error: std::io::Error) -> StoreError {
    match error.kind() {
        ErrorKind::NotFound => StoreError::NotFound,
        ErrorKind::AlreadyExists => StoreError::AlreadyExists,
        _ => StoreError::UnexpectedError(error.to_string()),
    }
}

#[async_trait::async_trait]
impl UserStore for FileRecordStore {
    async fn read_user(&self, phone_number: &PhoneNumber) -> Result<User, StoreError> {
        self.read(Collection::Users, phone_number.as_key()).await
    }

    async fn write_user(&self, user: User) -> Result<(), StoreError> {
        self.write(&user, Collection::Users, user.phone_number().as_key())
            .await
    }

    async fn update_user(&self, user: User) -> Result<(), StoreError> {
        self.update(&user, Collection::Users, user.phone_number().as_key())
            .await
    }

    async fn delete_user(&self, phone_number: &PhoneNumber) -> Result<(), StoreError> {
        self.delete(Collection::Users, phone_number.as_key()).await
    }
}

#[async_trait::async_trait]
impl CheckStore for FileRecordStore {
    async fn read_check(&self, id: &CheckId) -> Result<Check, StoreError> {
        self.read(Collection::Checks, id.as_ref()).await
    }

    async fn delete_check(&self, id: &CheckId) -> Result<(), StoreError> {
        self.delete(Collection::Checks, id.as_ref()).await
    }
}

#[async_trait::async_trait]
impl TokenRecordStore for FileRecordStore {
    async fn read_token(&self, id: &str) -> Result<TokenRecord, StoreError> {
        self.read(Collection::Tokens, id).await
    }
}
