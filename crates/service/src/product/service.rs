use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::ServiceError;
use super::{Product, ProductPatch, ProductRepository};

/// Application service the HTTP layer talks to.
/// Holds the repository behind a trait object so the backend is chosen at startup.
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Product>, ServiceError> {
        let list = self.repo.list_all().await?;
        info!(count = list.len(), "list products");
        Ok(list)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        self.repo.get(id).await
    }

    #[instrument(skip(self, product), fields(id = product.id))]
    pub async fn create(&self, product: Product) -> Result<Product, ServiceError> {
        let created = self.repo.create(product).await?;
        info!(id = created.id, name = %created.name, "created product");
        Ok(created)
    }

    /// Overwrite every field but the id. The id inside `product` is ignored.
    #[instrument(skip(self, product))]
    pub async fn replace(&self, id: i32, product: Product) -> Result<Option<Product>, ServiceError> {
        self.patch(id, ProductPatch::from(product)).await
    }

    /// Overwrite only the fields present in `patch`.
    #[instrument(skip(self, patch))]
    pub async fn patch(&self, id: i32, patch: ProductPatch) -> Result<Option<Product>, ServiceError> {
        let updated = self.repo.update(id, &patch).await?;
        if updated.is_some() {
            info!(id, "updated product");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        let removed = self.repo.delete(id).await?;
        if removed.is_some() {
            info!(id, "deleted product");
        }
        Ok(removed)
    }
}
