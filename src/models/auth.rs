// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// Administrador vindo do banco
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AdminUser {
    pub id: i64,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para cadastro de um novo administrador
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignUpPayload {
    #[validate(email(message = "email is invalid"))]
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignInPayload {
    #[validate(email(message = "email is invalid"))]
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenRefreshPayload {
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

// Resposta de autenticação com os dois tokens
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (ID do administrador)
    pub jti: String,
    pub typ: TokenKind,
    pub iat: usize,
    pub nbf: usize,
    pub exp: usize,
}
