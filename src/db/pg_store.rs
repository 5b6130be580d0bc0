// src/db/pg_store.rs

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, Transaction};

use crate::{
    config::Config,
    db::{
        BrandRepository, CatalogStore, CatalogTx, CategoryRepository, DbError, ProductRepository,
        UserRepository,
    },
    models::{
        auth::AdminUser,
        brand::{Brand, BrandPayload},
        category::{Category, CategoryPayload},
        product::{PriceChange, Product, ProductDraft, ProductPriceHistory},
    },
};

/// Abre a pool de conexões com o Postgres.
pub async fn connect(config: &Config) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .connect(&config.database_url)
        .await?;

    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
    Ok(pool)
}

#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn begin(&self) -> Result<Box<dyn CatalogTx>, DbError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgCatalogTx { tx }))
    }

    async fn create_brand(&self, input: &BrandPayload) -> Result<Brand, DbError> {
        BrandRepository::create(&self.pool, input).await
    }

    async fn list_brands(&self) -> Result<Vec<Brand>, DbError> {
        BrandRepository::list(&self.pool).await
    }

    async fn get_brand(&self, id: i64) -> Result<Option<Brand>, DbError> {
        BrandRepository::find_by_id(&self.pool, id).await
    }

    async fn update_brand(&self, id: i64, input: &BrandPayload) -> Result<Option<Brand>, DbError> {
        BrandRepository::update(&self.pool, id, input).await
    }

    async fn delete_brand(&self, id: i64) -> Result<u64, DbError> {
        BrandRepository::delete(&self.pool, id).await
    }

    async fn create_category(&self, input: &CategoryPayload) -> Result<Category, DbError> {
        CategoryRepository::create(&self.pool, input).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DbError> {
        CategoryRepository::list(&self.pool).await
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, DbError> {
        CategoryRepository::find_by_id(&self.pool, id).await
    }

    async fn update_category(
        &self,
        id: i64,
        input: &CategoryPayload,
    ) -> Result<Option<Category>, DbError> {
        CategoryRepository::update(&self.pool, id, input).await
    }

    async fn list_products(&self, active_only: bool) -> Result<Vec<Product>, DbError> {
        ProductRepository::list(&self.pool, active_only).await
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>, DbError> {
        ProductRepository::find_by_id(&self.pool, id).await
    }

    async fn delete_product(&self, id: i64) -> Result<u64, DbError> {
        ProductRepository::delete(&self.pool, id).await
    }

    async fn list_price_history(
        &self,
        product_id: i64,
    ) -> Result<Vec<ProductPriceHistory>, DbError> {
        ProductRepository::price_history(&self.pool, product_id).await
    }

    async fn create_admin_user(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<AdminUser, DbError> {
        UserRepository::create(&self.pool, email, password_hash).await
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, DbError> {
        UserRepository::find_by_email(&self.pool, email).await
    }
}

// Transação do sqlx: se for descartada sem commit, o rollback é automático.
pub struct PgCatalogTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl CatalogTx for PgCatalogTx {
    async fn delete_category(&mut self, id: i64) -> Result<u64, DbError> {
        CategoryRepository::delete(&mut *self.tx, id).await
    }

    async fn child_category_ids(&mut self, parent_id: i64) -> Result<Vec<i64>, DbError> {
        CategoryRepository::child_ids(&mut *self.tx, parent_id).await
    }

    async fn delete_products_by_category(&mut self, category_id: i64) -> Result<u64, DbError> {
        ProductRepository::delete_by_category(&mut *self.tx, category_id).await
    }

    async fn create_product(&mut self, input: &ProductDraft) -> Result<Product, DbError> {
        ProductRepository::create(&mut *self.tx, input).await
    }

    async fn get_product_for_update(&mut self, id: i64) -> Result<Option<Product>, DbError> {
        ProductRepository::find_by_id_for_update(&mut *self.tx, id).await
    }

    async fn update_product(
        &mut self,
        id: i64,
        input: &ProductDraft,
    ) -> Result<Option<Product>, DbError> {
        ProductRepository::update(&mut *self.tx, id, input).await
    }

    async fn insert_price_history(
        &mut self,
        change: &PriceChange,
    ) -> Result<ProductPriceHistory, DbError> {
        ProductRepository::record_price_change(&mut *self.tx, change).await
    }

    async fn commit(self: Box<Self>) -> Result<(), DbError> {
        self.tx.commit().await?;
        Ok(())
    }
}
