//! # Cartflow Testing
//!
//! Testing utilities and helpers for the Cartflow architecture.
//!
//! This crate provides:
//! - Mock implementations of the storage environment trait
//! - Assertion helpers for reducers
//! - The [`ReducerTest`] given/when/then harness
//!
//! ## Example
//!
//! ```ignore
//! use cartflow_testing::mocks::MemoryKeyValueStore;
//! use cartflow_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_cart_flow() {
//!     let storage = Arc::new(MemoryKeyValueStore::new());
//!     let env = CartEnvironment::new(storage);
//!     let store = Store::new(CartState::default(), CartReducer::new(), env);
//!
//!     store.send(CartAction::AddToCart { product }).await?;
//!
//!     let state = store.state(|s| s.clone()).await;
//!     assert_eq!(state.len(), 1);
//! }
//! ```

/// Ergonomic given/when/then testing for reducers
pub mod reducer_test;

/// Mock implementations for testing.
pub mod mocks {
    use cartflow_core::storage::{KeyValueStore, StorageError};
    use std::collections::HashMap;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, RwLock};

    /// In-memory key-value store for fast, deterministic tests
    ///
    /// Clones share the same underlying map, so a "restarted" store created
    /// from a clone sees everything the first store persisted - which is
    /// exactly what a hydration round-trip test needs.
    ///
    /// # Example
    ///
    /// ```
    /// use cartflow_testing::mocks::MemoryKeyValueStore;
    /// use cartflow_core::storage::KeyValueStore;
    ///
    /// # tokio_test::block_on(async {
    /// let store = MemoryKeyValueStore::new();
    /// store.set("products", "[]".to_string()).await.unwrap();
    /// assert_eq!(store.get("products").await.unwrap().as_deref(), Some("[]"));
    /// # });
    /// ```
    #[derive(Debug, Clone, Default)]
    pub struct MemoryKeyValueStore {
        entries: Arc<RwLock<HashMap<String, String>>>,
    }

    impl MemoryKeyValueStore {
        /// Create a new, empty store
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed the store with an initial entry (builder style)
        #[must_use]
        #[allow(clippy::unwrap_used)] // Lock poison is unrecoverable in tests
        pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
            self.entries
                .write()
                .unwrap()
                .insert(key.into(), value.into());
            self
        }

        /// Number of keys currently stored
        #[must_use]
        #[allow(clippy::unwrap_used)] // Lock poison is unrecoverable in tests
        pub fn len(&self) -> usize {
            self.entries.read().unwrap().len()
        }

        /// Whether the store holds no keys
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    impl KeyValueStore for MemoryKeyValueStore {
        #[allow(clippy::unwrap_used)] // Lock poison is unrecoverable in tests
        fn get(
            &self,
            key: &str,
        ) -> Pin<Box<dyn Future<Output = Result<Option<String>, StorageError>> + Send + '_>>
        {
            let value = self.entries.read().unwrap().get(key).cloned();
            Box::pin(async move { Ok(value) })
        }

        #[allow(clippy::unwrap_used)] // Lock poison is unrecoverable in tests
        fn set(
            &self,
            key: &str,
            value: String,
        ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + '_>> {
            self.entries.write().unwrap().insert(key.to_string(), value);
            Box::pin(async move { Ok(()) })
        }

        #[allow(clippy::unwrap_used)] // Lock poison is unrecoverable in tests
        fn remove(
            &self,
            key: &str,
        ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + '_>> {
            self.entries.write().unwrap().remove(key);
            Box::pin(async move { Ok(()) })
        }
    }

    /// Key-value store whose writes always fail
    ///
    /// Reads behave like an empty store. Useful for asserting that save
    /// failures are reported through the error channel instead of being
    /// silently dropped.
    #[derive(Debug, Clone, Default)]
    pub struct FailingKeyValueStore {
        write_attempts: Arc<AtomicUsize>,
    }

    impl FailingKeyValueStore {
        /// Create a new failing store
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of `set` calls attempted against this store
        #[must_use]
        pub fn write_attempts(&self) -> usize {
            self.write_attempts.load(Ordering::SeqCst)
        }
    }

    impl KeyValueStore for FailingKeyValueStore {
        fn get(
            &self,
            _key: &str,
        ) -> Pin<Box<dyn Future<Output = Result<Option<String>, StorageError>> + Send + '_>>
        {
            Box::pin(async move { Ok(None) })
        }

        fn set(
            &self,
            _key: &str,
            _value: String,
        ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + '_>> {
            self.write_attempts.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move { Err(StorageError::Io("injected write failure".to_string())) })
        }

        fn remove(
            &self,
            _key: &str,
        ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + '_>> {
            Box::pin(async move { Err(StorageError::Io("injected write failure".to_string())) })
        }
    }
}

// Re-export commonly used items
pub use mocks::{FailingKeyValueStore, MemoryKeyValueStore};
pub use reducer_test::{ReducerTest, assertions};
