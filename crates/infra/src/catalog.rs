use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use rigcheck_catalog::{Category, Product, ProductId};

use crate::error::CatalogError;

/// Supplies read-only product records.
///
/// Implementations own fetching and decoding; the engine only sees
/// `Product`s. Failures are returned, never retried here.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All products of one category, in catalog order.
    async fn products(&self, category: Category) -> Result<Vec<Product>, CatalogError>;

    /// A single product by id; `Ok(None)` when the catalog has no such id.
    async fn product(&self, id: &ProductId) -> Result<Option<Product>, CatalogError>;
}

#[async_trait]
impl<C> CatalogSource for Arc<C>
where
    C: CatalogSource + ?Sized,
{
    async fn products(&self, category: Category) -> Result<Vec<Product>, CatalogError> {
        (**self).products(category).await
    }

    async fn product(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        (**self).product(id).await
    }
}

/// In-memory catalog.
///
/// Intended for tests/dev and for catalogs shipped as a JSON snapshot.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    /// Load a JSON array of product records.
    ///
    /// Records that do not decode (unknown category, missing id) are skipped
    /// with a warning; a payload that is not an array is an error.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<Value> = serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        let mut products = Vec::with_capacity(raw.len());
        for (idx, record) in raw.into_iter().enumerate() {
            match serde_json::from_value::<Product>(record) {
                Ok(product) => products.push(product),
                Err(e) => tracing::warn!(index = idx, error = %e, "skipping undecodable catalog record"),
            }
        }
        Ok(Self::new(products))
    }

    pub async fn insert(&self, product: Product) {
        self.products.write().await.push(product);
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn products(&self, category: Category) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.read().await;
        Ok(products.iter().filter(|p| p.category == category).cloned().collect())
    }

    async fn product(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| &p.id == id).cloned())
    }
}
