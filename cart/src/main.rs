//! Simple CLI demo for the cart store.
//!
//! Persists the cart to a directory under the system temp dir, so running the
//! demo twice shows hydration picking up the previous session's cart.

use cart::{CartStore, ProductDescriptor};
use cartflow_storage::JsonFileStore;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn product(id: &str, title: &str, price: f64) -> ProductDescriptor {
    ProductDescriptor {
        id: id.to_string(),
        title: title.to_string(),
        image_url: format!("https://example.com/{id}.png"),
        price,
    }
}

async fn print_cart(store: &CartStore) {
    let items = store.snapshot().await;
    if items.is_empty() {
        println!("  (empty)");
    }
    for item in items {
        println!("  {} x{} @ {:.2}", item.title, item.quantity, item.price);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cart=debug,cartflow_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Cart Example ===\n");

    let data_dir = std::env::temp_dir().join("cartflow-demo");
    println!("Persisting cart under {}\n", data_dir.display());

    let store = CartStore::builder()
        .storage(Arc::new(JsonFileStore::new(data_dir)))
        .build()?;

    store.hydrate().await?;
    println!("Cart after hydration:");
    print_cart(&store).await;

    println!("\nAdding Shirt, Mug, and another Shirt...");
    store.add_to_cart(product("p1", "Shirt", 10.0)).await?;
    store.add_to_cart(product("p2", "Mug", 4.5)).await?;
    store.add_to_cart(product("p1", "Shirt", 10.0)).await?;
    print_cart(&store).await;

    println!("\nIncrementing Mug...");
    store.increment("p2").await?;
    print_cart(&store).await;

    println!("\nDecrementing Shirt twice (second one removes it)...");
    store.decrement("p1").await?;
    store.decrement("p1").await?;
    print_cart(&store).await;

    // Let in-flight persistence writes finish before exiting
    store.shutdown(Duration::from_secs(5)).await?;

    println!("\n=== Demo Complete ===");
    println!("Run again to see the persisted cart hydrate.");
    Ok(())
}
