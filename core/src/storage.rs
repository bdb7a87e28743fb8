//! Key-value storage trait and related types for persistence.
//!
//! This module defines the core abstraction for a local, process-durable
//! key-value store - the persistence backend a state container writes its
//! serialized snapshot to on every mutation and reads back at startup.
//!
//! # Design
//!
//! The `KeyValueStore` trait is deliberately minimal and focused. It provides
//! exactly what a snapshot-persisting state container needs:
//!
//! - Read the value stored under a key (if any)
//! - Overwrite the value stored under a key
//! - Remove a key
//!
//! There is no batching, no transactions, and no change notification. Values
//! are opaque strings; encoding is the caller's concern.
//!
//! # Implementations
//!
//! - `JsonFileStore` (in `cartflow-storage` crate): Production implementation
//! - `MemoryKeyValueStore` (in `cartflow-testing` crate): Fast, deterministic testing
//!
//! # Example
//!
//! ```no_run
//! use cartflow_core::storage::{KeyValueStore, StorageError};
//!
//! async fn example<S: KeyValueStore>(store: &S) -> Result<(), StorageError> {
//!     store.set("products", "[]".to_string()).await?;
//!
//!     let value = store.get("products").await?;
//!     assert_eq!(value.as_deref(), Some("[]"));
//!
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors that can occur during key-value store operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The key is not usable by this backend (e.g. contains path separators).
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Underlying I/O failure (disk, platform storage API).
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Key-value store abstraction for snapshot persistence.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to be safely used in async contexts
/// and shared across threads.
///
/// # Semantics
///
/// - `get` of a never-written key returns `Ok(None)` (not an error)
/// - `set` is a full overwrite of whatever was stored under the key
/// - writes are durable once the returned future resolves `Ok(())`
///
/// # Dyn Compatibility
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of
/// `async fn` to enable trait object usage (`Arc<dyn KeyValueStore>`). This is
/// required for the effect system where reducers create effects that capture
/// the storage backend.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` if the key exists
    /// - `Ok(None)` if the key was never written (or was removed)
    ///
    /// # Errors
    ///
    /// - `InvalidKey`: The key is not usable by this backend
    /// - `Io`: The underlying storage could not be read
    fn get(
        &self,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, StorageError>> + Send + '_>>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// - `InvalidKey`: The key is not usable by this backend
    /// - `Io`: The underlying storage could not be written
    fn set(
        &self,
        key: &str,
        value: String,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + '_>>;

    /// Remove `key` and its value. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// - `InvalidKey`: The key is not usable by this backend
    /// - `Io`: The underlying storage could not be written
    fn remove(
        &self,
        key: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + '_>>;
}
