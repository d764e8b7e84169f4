use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{AvailabilityChange, CreateProduct, Product, ReplaceProduct};

/// Persistence for products.
///
/// A missing id is reported as `None`/`false`, never as an error; `Err` is
/// reserved for store faults.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, ordered by id.
    async fn list(&self) -> ProductResult<Vec<Product>>;

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Insert with a fresh id and `availability = true`.
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Overwrite name, price and availability.
    async fn update(&self, id: i32, input: ReplaceProduct) -> ProductResult<Option<Product>>;

    /// Toggle or set availability in a single step.
    async fn set_availability(
        &self,
        id: i32,
        change: AvailabilityChange,
    ) -> ProductResult<Option<Product>>;

    /// `true` if a product was removed.
    async fn delete(&self, id: i32) -> ProductResult<bool>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    products: BTreeMap<i32, Product>,
    last_id: i32,
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Ids are never reused, matching a database sequence.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let state = self.state.read().await;
        Ok(state.products.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.get(&id).cloned())
    }

    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut state = self.state.write().await;
        state.last_id += 1;

        let product = Product {
            id: state.last_id,
            name: input.name,
            price: input.price,
            availability: true,
        };
        state.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn update(&self, id: i32, input: ReplaceProduct) -> ProductResult<Option<Product>> {
        let mut state = self.state.write().await;
        let Some(product) = state.products.get_mut(&id) else {
            return Ok(None);
        };

        product.name = input.name;
        product.price = input.price;
        product.availability = input.availability;

        tracing::info!(product_id = id, "Updated product");
        Ok(Some(product.clone()))
    }

    async fn set_availability(
        &self,
        id: i32,
        change: AvailabilityChange,
    ) -> ProductResult<Option<Product>> {
        let mut state = self.state.write().await;
        let Some(product) = state.products.get_mut(&id) else {
            return Ok(None);
        };

        product.availability = match change {
            AvailabilityChange::Toggle => !product.availability,
            AvailabilityChange::Set(value) => value,
        };

        tracing::info!(
            product_id = id,
            availability = product.availability,
            "Changed product availability"
        );
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut state = self.state.write().await;
        let removed = state.products.remove(&id).is_some();

        if removed {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(removed)
    }
}
