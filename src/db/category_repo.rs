// src/db/category_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    db::DbError,
    models::category::{Category, CategoryPayload},
};

pub struct CategoryRepository;

impl CategoryRepository {
    /// Cria uma categoria (raiz ou subcategoria).
    pub async fn create<'e, E>(executor: E, input: &CategoryPayload) -> Result<Category, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, slug, parent_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.slug)
        .bind(input.parent_id)
        .fetch_one(executor)
        .await?;
        Ok(category)
    }

    pub async fn list<'e, E>(executor: E) -> Result<Vec<Category>, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY id ASC")
            .fetch_all(executor)
            .await?;
        Ok(categories)
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Category>, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(category)
    }

    pub async fn update<'e, E>(
        executor: E,
        id: i64,
        input: &CategoryPayload,
    ) -> Result<Option<Category>, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, slug = $3, parent_id = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.slug)
        .bind(input.parent_id)
        .fetch_optional(executor)
        .await?;
        Ok(category)
    }

    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<u64, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// IDs dos filhos diretos de uma categoria.
    pub async fn child_ids<'e, E>(executor: E, parent_id: i64) -> Result<Vec<i64>, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM categories WHERE parent_id = $1 ORDER BY id ASC",
        )
        .bind(parent_id)
        .fetch_all(executor)
        .await?;
        Ok(ids)
    }
}
