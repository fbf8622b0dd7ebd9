use async_trait::async_trait;
use bs_core::{ArticleStorage, Error, Result};
use std::sync::Arc;

pub mod backends;

pub use backends::*;

#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Name used on the command line to select this backend
    fn kind() -> &'static str where Self: Sized;

    /// Open the backend at its default location
    async fn new() -> Result<Self> where Self: Sized;
}

/// Names accepted by [`create_storage`], depending on enabled features.
pub fn available_backends() -> Vec<&'static str> {
    let mut kinds = vec![InMemoryStorage::kind()];
    #[cfg(feature = "sqlite")]
    kinds.push(SQLiteStorage::kind());
    kinds
}

/// Open a storage backend by name. `url` overrides the backend's default location.
pub async fn create_storage(kind: &str, url: Option<&str>) -> Result<Arc<dyn ArticleStorage>> {
    match kind {
        "memory" => {
            if url.is_some() {
                tracing::warn!("Ignoring backend URL for in-memory storage");
            }
            Ok(Arc::new(InMemoryStorage::new()))
        }
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            let storage = match url {
                Some(path) => SQLiteStorage::new_with_path(&std::path::PathBuf::from(path)).await?,
                None => <SQLiteStorage as StorageBackend>::new().await?,
            };
            Ok(Arc::new(storage))
        }
        other => Err(Error::Storage(format!(
            "Unknown storage backend '{}'. Available: {}",
            other,
            available_backends().join(", ")
        ))),
    }
}
