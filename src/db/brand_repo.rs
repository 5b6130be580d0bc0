// src/db/brand_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    db::DbError,
    models::brand::{Brand, BrandPayload},
};

// Repositório de marcas. As funções aceitam qualquer executor (pool ou
// transação), como nos demais repositórios.
pub struct BrandRepository;

impl BrandRepository {
    pub async fn create<'e, E>(executor: E, input: &BrandPayload) -> Result<Brand, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let brand = sqlx::query_as::<_, Brand>(
            "INSERT INTO brands (name, slug) VALUES ($1, $2) RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.slug)
        .fetch_one(executor)
        .await?;
        Ok(brand)
    }

    pub async fn list<'e, E>(executor: E) -> Result<Vec<Brand>, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let brands = sqlx::query_as::<_, Brand>("SELECT * FROM brands ORDER BY id ASC")
            .fetch_all(executor)
            .await?;
        Ok(brands)
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Brand>, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let brand = sqlx::query_as::<_, Brand>("SELECT * FROM brands WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(brand)
    }

    pub async fn update<'e, E>(
        executor: E,
        id: i64,
        input: &BrandPayload,
    ) -> Result<Option<Brand>, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let brand = sqlx::query_as::<_, Brand>(
            r#"
            UPDATE brands
            SET name = $2, slug = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.slug)
        .fetch_optional(executor)
        .await?;
        Ok(brand)
    }

    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<u64, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
