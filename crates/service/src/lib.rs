//! Service layer providing the product store contract on top of models.
//! - `ProductRepository` is the storage seam (SeaORM or in-memory).
//! - `ProductService` is what the HTTP layer talks to.
//! - Startup seeding lives in `product::seed`.

pub mod errors;
pub mod product;
#[cfg(test)]
pub mod test_support;
