// src/db/store.rs

use async_trait::async_trait;

use crate::{
    db::DbError,
    models::{
        auth::AdminUser,
        brand::{Brand, BrandPayload},
        category::{Category, CategoryPayload},
        product::{PriceChange, Product, ProductDraft, ProductPriceHistory},
    },
};

/// Porta de persistência usada pelos serviços.
///
/// As operações aqui rodam em auto-commit. O que precisa ser atômico passa
/// por [`CatalogStore::begin`]. "Não encontrado" é `None` (leituras e
/// atualizações) ou `0` linhas afetadas (exclusões).
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn ping(&self) -> Result<(), DbError>;

    async fn begin(&self) -> Result<Box<dyn CatalogTx>, DbError>;

    // --- Marcas ---
    async fn create_brand(&self, input: &BrandPayload) -> Result<Brand, DbError>;
    async fn list_brands(&self) -> Result<Vec<Brand>, DbError>;
    async fn get_brand(&self, id: i64) -> Result<Option<Brand>, DbError>;
    async fn update_brand(&self, id: i64, input: &BrandPayload) -> Result<Option<Brand>, DbError>;
    async fn delete_brand(&self, id: i64) -> Result<u64, DbError>;

    // --- Categorias ---
    async fn create_category(&self, input: &CategoryPayload) -> Result<Category, DbError>;
    async fn list_categories(&self) -> Result<Vec<Category>, DbError>;
    async fn get_category(&self, id: i64) -> Result<Option<Category>, DbError>;
    async fn update_category(
        &self,
        id: i64,
        input: &CategoryPayload,
    ) -> Result<Option<Category>, DbError>;

    // --- Produtos ---
    async fn list_products(&self, active_only: bool) -> Result<Vec<Product>, DbError>;
    async fn get_product(&self, id: i64) -> Result<Option<Product>, DbError>;
    async fn delete_product(&self, id: i64) -> Result<u64, DbError>;
    async fn list_price_history(&self, product_id: i64)
        -> Result<Vec<ProductPriceHistory>, DbError>;

    // --- Administradores ---
    async fn create_admin_user(&self, email: &str, password_hash: &str)
        -> Result<AdminUser, DbError>;
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, DbError>;
}

/// Transação aberta. Descartar sem `commit` desfaz tudo.
#[async_trait]
pub trait CatalogTx: Send {
    async fn delete_category(&mut self, id: i64) -> Result<u64, DbError>;
    async fn child_category_ids(&mut self, parent_id: i64) -> Result<Vec<i64>, DbError>;
    async fn delete_products_by_category(&mut self, category_id: i64) -> Result<u64, DbError>;

    async fn create_product(&mut self, input: &ProductDraft) -> Result<Product, DbError>;
    /// Lê o produto travando a linha até o fim da transação.
    async fn get_product_for_update(&mut self, id: i64) -> Result<Option<Product>, DbError>;
    async fn update_product(
        &mut self,
        id: i64,
        input: &ProductDraft,
    ) -> Result<Option<Product>, DbError>;
    async fn insert_price_history(
        &mut self,
        change: &PriceChange,
    ) -> Result<ProductPriceHistory, DbError>;

    async fn commit(self: Box<Self>) -> Result<(), DbError>;
}
