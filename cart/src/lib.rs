//! Shopping-cart state container built on the Cartflow architecture.
//!
//! The cart holds a list of line-items in memory, persists the full list to a
//! key-value store after every mutation, and exposes three mutation
//! operations (add, increment, decrement) plus a hydrate-on-start load. It
//! demonstrates:
//!
//! - Simple domain model (line-items keyed by product id, insertion order)
//! - Fire-and-forget persistence as reducer effects
//! - Observer notification via the store's action broadcast
//! - Testing with `ReducerTest` and the mock storage backends
//!
//! # Quick Start
//!
//! ```no_run
//! use cart::{CartStore, ProductDescriptor};
//! use cartflow_storage::JsonFileStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Build the store and load whatever was persisted last session
//! let store = CartStore::builder()
//!     .storage(Arc::new(JsonFileStore::new("/var/lib/myapp/cart")))
//!     .build()?;
//! store.hydrate().await?;
//!
//! // Add a product
//! store.add_to_cart(ProductDescriptor {
//!     id: "p1".to_string(),
//!     title: "Shirt".to_string(),
//!     image_url: "https://example.com/shirt.png".to_string(),
//!     price: 10.0,
//! }).await?;
//!
//! // Read the snapshot
//! for item in store.snapshot().await {
//!     println!("{} x{}", item.title, item.quantity);
//! }
//! # Ok(())
//! # }
//! ```

pub mod reducer;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use reducer::{CART_STORAGE_KEY, CartEnvironment, CartReducer};
pub use store::{CartError, CartStore, CartStoreBuilder};
pub use types::{CartAction, CartItem, CartState, ProductDescriptor};
