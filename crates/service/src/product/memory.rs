use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use super::{Product, ProductPatch, ProductRepository};

/// Process-local store; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryProductRepository {
    inner: RwLock<BTreeMap<i32, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(&id).cloned())
    }

    async fn create(&self, product: Product) -> Result<Product, ServiceError> {
        let mut map = self.inner.write().await;
        if map.contains_key(&product.id) {
            return Err(ServiceError::duplicate_id(product.id));
        }
        map.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i32, patch: &ProductPatch) -> Result<Option<Product>, ServiceError> {
        let mut map = self.inner.write().await;
        Ok(map.get_mut(&id).map(|existing| {
            patch.apply(existing);
            existing.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        let mut map = self.inner.write().await;
        Ok(map.remove(&id))
    }
}
