// src/models/brand.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::validation::validate_slug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Usado tanto na criação quanto na atualização
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BrandPayload {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    #[schema(example = "Acme")]
    pub name: String,

    #[validate(
        length(min = 1, max = 255, message = "slug is required"),
        custom(function = "validate_slug")
    )]
    #[schema(example = "acme")]
    pub slug: String,
}
