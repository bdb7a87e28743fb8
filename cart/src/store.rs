//! The cart store facade.
//!
//! [`CartStore`] wraps the generic [`Store`] runtime with the four cart
//! operations and is handed to consumers by value (explicit dependency
//! injection). A store cannot be built without a storage backend; that
//! wiring mistake is a [`CartError::StorageNotConfigured`] at construction
//! time rather than a failure at first use.

use crate::reducer::{CartEnvironment, CartReducer};
use crate::types::{CartAction, CartItem, CartState, ProductDescriptor};
use cartflow_core::storage::KeyValueStore;
use cartflow_runtime::{EffectHandle, Store, error::StoreError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::broadcast;

/// Errors surfaced by the cart store facade
#[derive(Error, Debug)]
pub enum CartError {
    /// The store was built without a storage backend
    ///
    /// This indicates a wiring mistake by the integrating application, not a
    /// runtime data condition.
    #[error("Cart store requires a storage backend; wire one with CartStoreBuilder::storage()")]
    StorageNotConfigured,

    /// The underlying store runtime rejected the operation
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Builder for [`CartStore`]
///
/// # Example
///
/// ```ignore
/// let store = CartStore::builder()
///     .storage(Arc::new(JsonFileStore::new(data_dir)))
///     .build()?;
/// store.hydrate().await?;
/// ```
#[derive(Default)]
pub struct CartStoreBuilder {
    storage: Option<Arc<dyn KeyValueStore>>,
    broadcast_capacity: Option<usize>,
}

impl CartStoreBuilder {
    /// Set the persistence backend (required)
    #[must_use]
    pub fn storage(mut self, storage: Arc<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Set the action broadcast capacity (defaults to 16)
    #[must_use]
    pub const fn broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = Some(capacity);
        self
    }

    /// Build the cart store, starting from an empty cart
    ///
    /// Call [`CartStore::hydrate`] afterwards to load the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::StorageNotConfigured`] if no backend was supplied.
    pub fn build(self) -> Result<CartStore, CartError> {
        let storage = self.storage.ok_or(CartError::StorageNotConfigured)?;
        let env = CartEnvironment::new(storage);

        let inner = Store::with_broadcast_capacity(
            CartState::new(),
            CartReducer::new(),
            env,
            self.broadcast_capacity.unwrap_or(16),
        );

        Ok(CartStore { inner })
    }
}

/// Shopping-cart state container.
///
/// Holds the line-item list in memory, persists it under a fixed key after
/// every mutation, and notifies subscribers of hydration and persistence
/// outcomes. Mutations update in-memory state synchronously; the persistence
/// write runs in the background (await the returned [`EffectHandle`] when
/// durability matters).
///
/// Clones share the same underlying state.
#[derive(Clone)]
pub struct CartStore {
    inner: Store<CartState, CartAction, CartEnvironment, CartReducer>,
}

impl CartStore {
    /// Start building a cart store
    #[must_use]
    pub fn builder() -> CartStoreBuilder {
        CartStoreBuilder::default()
    }

    /// Load the persisted cart from storage, replacing in-memory state.
    ///
    /// Runs once at startup. A missing key, read failure, or malformed
    /// payload leaves the cart empty without surfacing an error; this method
    /// returns once hydration has been applied.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] if the store is shutting down.
    pub async fn hydrate(&self) -> Result<(), CartError> {
        let mut handle = self.inner.send(CartAction::Hydrate).await?;
        handle.wait().await;
        Ok(())
    }

    /// Add a product to the cart.
    ///
    /// An existing line-item with the same id has its quantity bumped by 1;
    /// otherwise a new line-item is inserted with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] if the store is shutting down.
    pub async fn add_to_cart(
        &self,
        product: ProductDescriptor,
    ) -> Result<EffectHandle, CartError> {
        Ok(self.inner.send(CartAction::AddToCart { product }).await?)
    }

    /// Increase the quantity of a line-item by 1. No-op if absent.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] if the store is shutting down.
    pub async fn increment(&self, id: impl Into<String>) -> Result<EffectHandle, CartError> {
        Ok(self.inner.send(CartAction::Increment { id: id.into() }).await?)
    }

    /// Decrease the quantity of a line-item by 1, removing it when the result
    /// would reach 0. No-op if absent.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] if the store is shutting down.
    pub async fn decrement(&self, id: impl Into<String>) -> Result<EffectHandle, CartError> {
        Ok(self.inner.send(CartAction::Decrement { id: id.into() }).await?)
    }

    /// Current line-items in insertion order.
    ///
    /// Returns an owned snapshot; reading twice without an intervening
    /// mutation yields equal collections.
    pub async fn snapshot(&self) -> Vec<CartItem> {
        self.inner.state(|s| s.items.clone()).await
    }

    /// Error message of the most recent failed persistence write, if any
    pub async fn last_persist_error(&self) -> Option<String> {
        self.inner.state(|s| s.last_persist_error.clone()).await
    }

    /// Subscribe to hydration and persistence outcomes.
    ///
    /// Observers receive [`CartAction::Hydrated`], [`CartAction::Persisted`],
    /// and [`CartAction::PersistFailed`]. No-op mutations produce no
    /// notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartAction> {
        self.inner.subscribe_actions()
    }

    /// Gracefully shut down, waiting for in-flight persistence writes.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] if writes were still running when the
    /// timeout expired.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), CartError> {
        Ok(self.inner.shutdown(timeout).await?)
    }
}
