use tracing::info;

use crate::errors::ServiceError;
use super::{Product, ProductRepository};

/// A seed row; `'static` so the whole set can be a constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedProduct {
    pub id: i32,
    pub name: &'static str,
    pub description: &'static str,
    pub price: f64,
    pub quantity: i32,
}

impl From<&SeedProduct> for Product {
    fn from(s: &SeedProduct) -> Self {
        Product {
            id: s.id,
            name: s.name.to_string(),
            description: s.description.to_string(),
            price: s.price,
            quantity: s.quantity,
        }
    }
}

pub const SEED_PRODUCTS: [SeedProduct; 4] = [
    SeedProduct { id: 1, name: "Phone", description: "A smartphone", price: 699.99, quantity: 50 },
    SeedProduct { id: 2, name: "Laptop", description: "A powerful laptop", price: 999.99, quantity: 30 },
    SeedProduct { id: 3, name: "Pen", description: "A blue ink pen", price: 1.99, quantity: 100 },
    SeedProduct { id: 4, name: "Table", description: "A wooden table", price: 199.99, quantity: 20 },
];

/// Insert `seeds` only when the store holds no products. Returns how many rows were written.
pub async fn seed_if_empty(repo: &dyn ProductRepository, seeds: &[SeedProduct]) -> Result<usize, ServiceError> {
    if !repo.list_all().await?.is_empty() {
        info!(event = "seed_skipped", "product store not empty; skipping seed");
        return Ok(0);
    }
    for seed in seeds {
        repo.create(Product::from(seed)).await?;
    }
    info!(event = "seed_applied", count = seeds.len(), "seeded product store");
    Ok(seeds.len())
}
