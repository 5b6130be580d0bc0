// src/models/category.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::validation::validate_slug;

/// Nó da árvore de categorias. `parent_id == None` é uma raiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CategoryPayload {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    #[schema(example = "Shoes")]
    pub name: String,

    #[validate(
        length(min = 1, max = 255, message = "slug is required"),
        custom(function = "validate_slug")
    )]
    #[schema(example = "shoes")]
    pub slug: String,

    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// Resultado de uma exclusão em cascata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeSummary {
    pub categories: u64,
    pub products: u64,
}
