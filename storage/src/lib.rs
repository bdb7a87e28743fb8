//! # Cartflow Storage
//!
//! File-backed [`KeyValueStore`] implementation.
//!
//! [`JsonFileStore`] persists each key as one file under a root directory.
//! It is the process-durable backend a cart store hydrates from at startup
//! and writes its serialized snapshot to after every mutation - the
//! production analog of a platform key-value storage API.
//!
//! ## Example
//!
//! ```no_run
//! use cartflow_core::storage::KeyValueStore;
//! use cartflow_storage::JsonFileStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonFileStore::new("/var/lib/myapp/cart");
//!
//! store.set("products", "[]".to_string()).await?;
//! let value = store.get("products").await?;
//! assert_eq!(value.as_deref(), Some("[]"));
//! # Ok(())
//! # }
//! ```

use cartflow_core::storage::{KeyValueStore, StorageError};
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

/// A [`KeyValueStore`] that keeps one JSON file per key under a root directory.
///
/// Writes are full overwrites of the key's file. The root directory is created
/// lazily on first write, so constructing the store never touches the disk.
///
/// Keys must be plain names: path separators and `..` are rejected with
/// [`StorageError::InvalidKey`] so a key can never escape the root directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this store keeps its files in.
    #[must_use]
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty()
            || key == ".."
            || key.contains('/')
            || key.contains('\\')
            || key.contains('\0')
        {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(
        &self,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, StorageError>> + Send + '_>> {
        let path = self.path_for(key);

        Box::pin(async move {
            let path = path?;
            match tokio::fs::read_to_string(&path).await {
                Ok(value) => Ok(Some(value)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to read key file");
                    Err(StorageError::Io(e.to_string()))
                }
            }
        })
    }

    fn set(
        &self,
        key: &str,
        value: String,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + '_>> {
        let path = self.path_for(key);
        let root = self.root.clone();

        Box::pin(async move {
            let path = path?;
            tokio::fs::create_dir_all(&root)
                .await
                .map_err(|e| StorageError::Io(e.to_string()))?;

            tokio::fs::write(&path, value).await.map_err(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Failed to write key file");
                StorageError::Io(e.to_string())
            })
        })
    }

    fn remove(
        &self,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + '_>> {
        let path = self.path_for(key);

        Box::pin(async move {
            let path = path?;
            match tokio::fs::remove_file(&path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(StorageError::Io(e.to_string())),
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests can unwrap
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> JsonFileStore {
        let root = std::env::temp_dir().join(format!("cartflow-storage-test-{}", Uuid::new_v4()));
        JsonFileStore::new(root)
    }

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let store = temp_store();
        let value = store.get("products").await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = temp_store();

        store
            .set("products", r#"[{"id":"p1"}]"#.to_string())
            .await
            .unwrap();

        let value = store.get("products").await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"[{"id":"p1"}]"#));

        let _ = tokio::fs::remove_dir_all(store.root()).await;
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let store = temp_store();

        store.set("products", "[]".to_string()).await.unwrap();
        store.set("products", "[1]".to_string()).await.unwrap();

        let value = store.get("products").await.unwrap();
        assert_eq!(value.as_deref(), Some("[1]"));

        let _ = tokio::fs::remove_dir_all(store.root()).await;
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = temp_store();

        store.set("products", "[]".to_string()).await.unwrap();
        store.remove("products").await.unwrap();
        store.remove("products").await.unwrap();

        assert_eq!(store.get("products").await.unwrap(), None);

        let _ = tokio::fs::remove_dir_all(store.root()).await;
    }

    #[tokio::test]
    async fn keys_with_path_separators_are_rejected() {
        let store = temp_store();

        let err = store.set("../escape", "x".to_string()).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));

        let err = store.get("a/b").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn empty_key_is_rejected() {
        let store = temp_store();
        let err = store.get("").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
