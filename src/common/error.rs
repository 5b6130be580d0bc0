// src/common/error.rs

use std::collections::HashMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::DbError;

/// Erro único da aplicação.
///
/// Cada variante carrega a mensagem mostrada ao cliente (o `Display`) e a
/// causa original, que só vai para o log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal server error")]
    Internal(#[source] anyhow::Error),

    #[error("not found")]
    NotFound(#[source] anyhow::Error),

    #[error("bad request")]
    BadRequest(#[source] anyhow::Error),

    #[error("validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error("unauthorized")]
    Unauthorized(#[source] anyhow::Error),

    #[error("{message}")]
    Conflict {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("{message}")]
    UnprocessableEntity {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Mensagem + toda a cadeia de causas, no formato `a -> b -> c`.
    pub fn cause_chain(&self) -> String {
        let mut chain = vec![self.to_string()];
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            chain.push(err.to_string());
            source = err.source();
        }
        chain.join(" -> ")
    }

    fn unique_violation(constraint: &str, source: DbError) -> Self {
        let message = match constraint {
            "brands_name_key" => "name already exists",
            "brands_slug_key" | "categories_slug_key" | "products_slug_key" => {
                "slug already exists"
            }
            "admin_users_email_key" => "email already exists",
            _ => "unique violation",
        };
        AppError::Conflict { message, source: source.into() }
    }

    fn foreign_key_violation(constraint: &str, source: DbError) -> Self {
        let message = match constraint {
            "fk_categories_parent_id" => "there is no category with such parent id",
            "fk_products_brand_id" => "there is no brand with such id",
            "fk_products_category_id" => "there is no category with such id",
            _ => "foreign key violation",
        };
        AppError::UnprocessableEntity { message, source: source.into() }
    }
}

// Toda falha de persistência é classificada aqui antes de sair do serviço.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match &err {
            DbError::UniqueViolation { constraint } => {
                let constraint = constraint.clone();
                AppError::unique_violation(&constraint, err)
            }
            DbError::ForeignKeyViolation { constraint } => {
                let constraint = constraint.clone();
                AppError::foreign_key_violation(&constraint, err)
            }
            DbError::Query(_) | DbError::Store(_) => AppError::Internal(err.into()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(elapsed: tokio::time::error::Elapsed) -> Self {
        AppError::Internal(anyhow::Error::new(elapsed).context("transaction deadline exceeded"))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // A causa nunca vai para o cliente, só para o log.
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.cause_chain(), "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.cause_chain(), "request rejected");
        }

        let body = match &self {
            AppError::Validation(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(message) => message.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                json!({
                    "status": status.as_u16(),
                    "message": self.to_string(),
                    "details": details,
                })
            }
            _ => json!({
                "status": status.as_u16(),
                "message": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
