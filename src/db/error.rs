// src/db/error.rs

use thiserror::Error;

/// Erro da camada de persistência.
///
/// Violações de unicidade e de chave estrangeira chegam separadas, com o nome
/// da constraint, para que o serviço escolha a mensagem certa.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("unique constraint `{constraint}` violated")]
    UniqueViolation { constraint: String },

    #[error("foreign key constraint `{constraint}` violated")]
    ForeignKeyViolation { constraint: String },

    #[error("database query failed")]
    Query(#[source] sqlx::Error),

    // Falhas de stores que não são Postgres (ex.: store em memória)
    #[error("store failure: {0}")]
    Store(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            if db_err.is_unique_violation() {
                return DbError::UniqueViolation { constraint };
            }
            if db_err.is_foreign_key_violation() {
                return DbError::ForeignKeyViolation { constraint };
            }
        }
        DbError::Query(err)
    }
}

impl DbError {
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, DbError::ForeignKeyViolation { .. })
    }
}
