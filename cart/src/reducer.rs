//! Reducer logic for the cart aggregate.
//!
//! Mutations apply to in-memory state synchronously, then return a persistence
//! effect carrying the post-mutation snapshot. The durable copy therefore
//! always converges on what readers already observe; persistence failures come
//! back as [`CartAction::PersistFailed`] instead of being dropped.

use crate::types::{CartAction, CartItem, CartState};
use cartflow_core::{
    SmallVec, effect::Effect, reducer::Reducer, smallvec, storage::KeyValueStore,
};
use std::sync::Arc;

/// Fixed key the whole cart is persisted under.
pub const CART_STORAGE_KEY: &str = "products";

/// Environment dependencies for the cart reducer
#[derive(Clone)]
pub struct CartEnvironment {
    /// Persistence backend the cart hydrates from and writes snapshots to
    pub storage: Arc<dyn KeyValueStore>,
}

impl CartEnvironment {
    /// Creates a new `CartEnvironment`
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }
}

/// Reducer for the cart aggregate
#[derive(Clone, Debug)]
pub struct CartReducer;

impl CartReducer {
    /// Creates a new `CartReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the effect that writes the current snapshot to storage.
    ///
    /// The snapshot is taken here, after the mutation was applied, so the
    /// write can never carry a state older than what readers see.
    fn persist(state: &CartState, env: &CartEnvironment) -> Effect<CartAction> {
        let payload = match serde_json::to_string(&state.items) {
            Ok(json) => json,
            Err(e) => {
                return Effect::future(async move {
                    Some(CartAction::PersistFailed {
                        error: e.to_string(),
                    })
                });
            }
        };

        let storage = Arc::clone(&env.storage);
        Effect::future(async move {
            match storage.set(CART_STORAGE_KEY, payload).await {
                Ok(()) => Some(CartAction::Persisted),
                Err(e) => Some(CartAction::PersistFailed {
                    error: e.to_string(),
                }),
            }
        })
    }

    /// Builds the effect that reads the persisted cart back from storage.
    ///
    /// Missing key, read error, and malformed payload all resolve to no
    /// action: the cart stays empty and the failure is logged, never surfaced.
    fn load(env: &CartEnvironment) -> Effect<CartAction> {
        let storage = Arc::clone(&env.storage);
        Effect::future(async move {
            match storage.get(CART_STORAGE_KEY).await {
                Ok(Some(payload)) => match serde_json::from_str::<Vec<CartItem>>(&payload) {
                    Ok(items) => Some(CartAction::Hydrated { items }),
                    Err(e) => {
                        tracing::warn!(error = %e, "Persisted cart is malformed, starting empty");
                        None
                    }
                },
                Ok(None) => None,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read persisted cart, starting empty");
                    None
                }
            }
        })
    }
}

impl Default for CartReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;
    type Environment = CartEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            CartAction::AddToCart { product } => {
                if let Some(item) = state.item_mut(&product.id) {
                    item.quantity += 1;
                } else {
                    state.items.push(CartItem::from(product));
                }

                smallvec![Self::persist(state, env)]
            }

            CartAction::Increment { id } => {
                let Some(item) = state.item_mut(&id) else {
                    tracing::debug!(%id, "Increment for item not in cart, ignoring");
                    return SmallVec::new();
                };
                item.quantity += 1;

                smallvec![Self::persist(state, env)]
            }

            CartAction::Decrement { id } => {
                let Some(index) = state.position(&id) else {
                    tracing::debug!(%id, "Decrement for item not in cart, ignoring");
                    return SmallVec::new();
                };

                // Quantity never reaches 0: the line-item is removed instead
                if state.items[index].quantity <= 1 {
                    state.items.remove(index);
                } else {
                    state.items[index].quantity -= 1;
                }

                smallvec![Self::persist(state, env)]
            }

            CartAction::Hydrate => smallvec![Self::load(env)],

            // ========== Events ==========
            CartAction::Hydrated { items } => {
                // Enforce the positive-quantity invariant on whatever was
                // persisted by earlier runs
                state.items = items.into_iter().filter(|i| i.quantity > 0).collect();
                SmallVec::new()
            }

            CartAction::Persisted => {
                state.last_persist_error = None;
                SmallVec::new()
            }

            CartAction::PersistFailed { error } => {
                tracing::error!(%error, "Cart persistence failed, keeping last good in-memory state");
                state.last_persist_error = Some(error);
                SmallVec::new()
            }
        }
    }
}
