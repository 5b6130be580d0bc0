// src/db/product_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    db::DbError,
    models::product::{PriceChange, Product, ProductDraft, ProductPriceHistory},
};

pub struct ProductRepository;

impl ProductRepository {
    pub async fn create<'e, E>(executor: E, input: &ProductDraft) -> Result<Product, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (brand_id, category_id, name, slug, description, price_kopeck, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(input.brand_id)
        .bind(input.category_id)
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(input.price_kopeck)
        .bind(input.is_active)
        .fetch_one(executor)
        .await?;
        Ok(product)
    }

    pub async fn list<'e, E>(executor: E, active_only: bool) -> Result<Vec<Product>, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE ($1 = FALSE OR is_active) ORDER BY id ASC",
        )
        .bind(active_only)
        .fetch_all(executor)
        .await?;
        Ok(products)
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Product>, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(product)
    }

    /// Mesma leitura, mas com `FOR UPDATE`: só faz sentido dentro de transação.
    pub async fn find_by_id_for_update<'e, E>(
        executor: E,
        id: i64,
    ) -> Result<Option<Product>, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(product)
    }

    pub async fn update<'e, E>(
        executor: E,
        id: i64,
        input: &ProductDraft,
    ) -> Result<Option<Product>, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET brand_id = $2,
                category_id = $3,
                name = $4,
                slug = $5,
                description = $6,
                price_kopeck = $7,
                is_active = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.brand_id)
        .bind(input.category_id)
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(input.price_kopeck)
        .bind(input.is_active)
        .fetch_optional(executor)
        .await?;
        Ok(product)
    }

    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<u64, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_category<'e, E>(executor: E, category_id: i64) -> Result<u64, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM products WHERE category_id = $1")
            .bind(category_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Registra uma transição de preço no livro (auditoria).
    pub async fn record_price_change<'e, E>(
        executor: E,
        change: &PriceChange,
    ) -> Result<ProductPriceHistory, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entry = sqlx::query_as::<_, ProductPriceHistory>(
            r#"
            INSERT INTO product_price_history (product_id, old_price_kopeck, new_price_kopeck, updated_by)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(change.product_id)
        .bind(change.old_price_kopeck)
        .bind(change.new_price_kopeck)
        .bind(change.updated_by)
        .fetch_one(executor)
        .await?;
        Ok(entry)
    }

    pub async fn price_history<'e, E>(
        executor: E,
        product_id: i64,
    ) -> Result<Vec<ProductPriceHistory>, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let history = sqlx::query_as::<_, ProductPriceHistory>(
            "SELECT * FROM product_price_history WHERE product_id = $1 ORDER BY changed_at ASC, id ASC",
        )
        .bind(product_id)
        .fetch_all(executor)
        .await?;
        Ok(history)
    }
}
