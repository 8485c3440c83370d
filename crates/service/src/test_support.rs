#![cfg(test)]
use std::sync::Arc;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::product::{InMemoryProductRepository, ProductRepository, SeaOrmProductRepository};

/// Fresh in-memory SQLite database with the schema applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect_sqlite_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// One empty repository per backend, labelled for assertion messages.
pub async fn backends() -> Result<Vec<(&'static str, Arc<dyn ProductRepository>)>, anyhow::Error> {
    let db = get_db().await?;
    let seaorm: Arc<dyn ProductRepository> = Arc::new(SeaOrmProductRepository::new(db));
    let memory: Arc<dyn ProductRepository> = Arc::new(InMemoryProductRepository::new());
    Ok(vec![("seaorm", seaorm), ("memory", memory)])
}
