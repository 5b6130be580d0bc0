pub mod error;
pub use error::DbError;
pub mod store;
pub use store::{CatalogStore, CatalogTx};

pub mod brand_repo;
pub use brand_repo::BrandRepository;
pub mod category_repo;
pub use category_repo::CategoryRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod user_repo;
pub use user_repo::UserRepository;

pub mod pg_store;
pub use pg_store::{PgCatalogStore, connect};
pub mod memory_store;
pub use memory_store::MemoryCatalogStore;
