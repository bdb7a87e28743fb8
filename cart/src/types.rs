//! Domain types for the shopping cart.
//!
//! A cart is an ordered list of line-items, one per distinct product id.
//! Products enter the cart through [`ProductDescriptor`] (no quantity - first
//! insertion always starts at 1) and live in it as [`CartItem`]s.

use serde::{Deserialize, Serialize};

/// A product as presented at the cart boundary.
///
/// Deliberately has no quantity field: adding a product to the cart either
/// inserts a line-item with quantity 1 or bumps the existing line-item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductDescriptor {
    /// Unique product identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Product image URL
    pub image_url: String,
    /// Unit price
    pub price: f64,
}

/// One entry in the cart: a product and how many of it are held.
///
/// Invariant: `quantity` is always positive; an item whose quantity would
/// reach 0 is removed from the cart instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Unique product identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Product image URL
    pub image_url: String,
    /// Unit price
    pub price: f64,
    /// Number of units held, always >= 1
    pub quantity: u32,
}

impl From<ProductDescriptor> for CartItem {
    /// First insertion of a product into the cart starts at quantity 1
    fn from(product: ProductDescriptor) -> Self {
        Self {
            id: product.id,
            title: product.title,
            image_url: product.image_url,
            price: product.price,
            quantity: 1,
        }
    }
}

/// State of the cart: the ordered line-item list plus the save-failure channel.
///
/// Items keep insertion order and hold a unique `id` each. The in-memory state
/// is authoritative while the process runs; the persisted copy lags behind
/// until the write effect completes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CartState {
    /// Line-items in insertion order
    pub items: Vec<CartItem>,
    /// Error message of the most recent failed persistence write, cleared on
    /// the next successful write
    pub last_persist_error: Option<String>,
}

impl CartState {
    /// Creates a new empty cart
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            last_persist_error: None,
        }
    }

    /// Number of distinct line-items in the cart
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no line-items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the line-item for a product id, if present
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns the quantity held for a product id (0 if absent)
    #[must_use]
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.get(id).map_or(0, |item| item.quantity)
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub(crate) fn item_mut(&mut self, id: &str) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }
}

/// Actions representing commands and feedback events for the cart.
///
/// Commands express intent from the UI (add, increment, decrement, hydrate).
/// Feedback events report the outcome of asynchronous effects (hydration
/// results, persistence outcomes) and are what observers see on the action
/// broadcast.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CartAction {
    // ========== Commands ==========
    /// Command: Add a product to the cart (insert at quantity 1 or bump by 1)
    AddToCart {
        /// The product to add
        product: ProductDescriptor,
    },

    /// Command: Increase the quantity of a line-item by 1. No-op if absent.
    Increment {
        /// Product id of the line-item
        id: String,
    },

    /// Command: Decrease the quantity of a line-item by 1, removing it at 0.
    /// No-op if absent.
    Decrement {
        /// Product id of the line-item
        id: String,
    },

    /// Command: Load the persisted cart from storage (runs once at startup)
    Hydrate,

    // ========== Events ==========
    /// Event: The persisted cart was loaded
    Hydrated {
        /// Line-items read back from storage
        items: Vec<CartItem>,
    },

    /// Event: The cart snapshot was written to storage
    Persisted,

    /// Event: Writing the cart snapshot to storage failed
    PersistFailed {
        /// Why the write failed
        error: String,
    },
}
