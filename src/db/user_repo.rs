// src/db/user_repo.rs

use sqlx::{Executor, Postgres};

use crate::{db::DbError, models::auth::AdminUser};

// Responsável pela tabela 'admin_users'
pub struct UserRepository;

impl UserRepository {
    // Busca um administrador pelo e-mail
    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<AdminUser>, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE email = $1")
            .bind(email)
            .fetch_optional(executor)
            .await?;
        Ok(user)
    }

    // Cria um novo administrador. E-mail duplicado vira UniqueViolation.
    pub async fn create<'e, E>(
        executor: E,
        email: &str,
        password_hash: &str,
    ) -> Result<AdminUser, DbError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, AdminUser>(
            "INSERT INTO admin_users (email, password_hash) VALUES ($1, $2) RETURNING *",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(executor)
        .await?;
        Ok(user)
    }
}
