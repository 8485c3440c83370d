use async_trait::async_trait;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::debug;

use crate::errors::ServiceError;
use super::{Product, ProductPatch};

/// Storage contract for products keyed by `id`.
///
/// A missing id is an ordinary outcome and comes back as `Ok(None)`; `Err` is
/// reserved for storage failures and duplicate ids on create.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, ascending by id.
    async fn list_all(&self) -> Result<Vec<Product>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Product>, ServiceError>;
    /// Store `product` under its own id. Fails with `Conflict` if the id is taken.
    async fn create(&self, product: Product) -> Result<Product, ServiceError>;
    /// Apply `patch` to the record at `id`, returning the updated record.
    async fn update(&self, id: i32, patch: &ProductPatch) -> Result<Option<Product>, ServiceError>;
    /// Remove the record at `id`, returning what was removed.
    async fn delete(&self, id: i32) -> Result<Option<Product>, ServiceError>;
}

/// SeaORM-backed repository implementation.
///
/// Each call borrows the pool for one read/write sequence; multi-step calls run
/// in a transaction that rolls back on drop if not committed.
#[derive(Clone)]
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(models::product::list(&self.db).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        Ok(models::product::find(&self.db, id).await?)
    }

    async fn create(&self, product: Product) -> Result<Product, ServiceError> {
        let id = product.id;
        let txn = self.db.begin().await?;
        if models::product::find(&txn, id).await?.is_some() {
            return Err(ServiceError::duplicate_id(id));
        }
        let created = models::product::insert(&txn, product)
            .await
            .map_err(|e| match ServiceError::from(e) {
                ServiceError::Conflict(_) => ServiceError::duplicate_id(id),
                other => other,
            })?;
        txn.commit().await?;
        Ok(created)
    }

    async fn update(&self, id: i32, patch: &ProductPatch) -> Result<Option<Product>, ServiceError> {
        let txn = self.db.begin().await?;
        let Some(existing) = models::product::find(&txn, id).await? else {
            debug!(id, "update target missing");
            return Ok(None);
        };
        if patch.is_empty() {
            // nothing to write; the read-only transaction rolls back on drop
            return Ok(Some(existing));
        }
        let updated = models::product::update(&txn, existing, patch).await?;
        txn.commit().await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        let txn = self.db.begin().await?;
        let Some(existing) = models::product::find(&txn, id).await? else {
            return Ok(None);
        };
        models::product::delete(&txn, id).await?;
        txn.commit().await?;
        Ok(Some(existing))
    }
}
