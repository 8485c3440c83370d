pub mod repository;
pub mod memory;
pub mod service;
pub mod seed;

pub use models::product::{Model as Product, ProductPatch};
pub use repository::{ProductRepository, SeaOrmProductRepository};
pub use memory::InMemoryProductRepository;
pub use service::ProductService;
