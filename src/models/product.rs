// src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::validation::validate_slug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: i64,
    pub brand_id: i64,
    pub category_id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Preço na menor unidade da moeda.
    pub price_kopeck: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    pub brand_id: i64,
    pub category_id: i64,

    #[validate(length(min = 1, max = 255, message = "name is required"))]
    #[schema(example = "Trail runner")]
    pub name: String,

    #[validate(
        length(min = 1, max = 255, message = "slug is required"),
        custom(function = "validate_slug")
    )]
    #[schema(example = "trail-runner")]
    pub slug: String,

    pub description: Option<String>,

    #[validate(range(min = 0, message = "price_kopeck cannot be negative"))]
    #[schema(example = 129900)]
    pub price_kopeck: i64,

    pub is_active: Option<bool>,
}

/// Campos do produto já com os valores padrão aplicados, prontos para gravar.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub brand_id: i64,
    pub category_id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price_kopeck: i64,
    pub is_active: bool,
}

impl From<ProductPayload> for ProductDraft {
    fn from(payload: ProductPayload) -> Self {
        Self {
            brand_id: payload.brand_id,
            category_id: payload.category_id,
            name: payload.name,
            slug: payload.slug,
            description: payload.description.unwrap_or_default(),
            price_kopeck: payload.price_kopeck,
            is_active: payload.is_active.unwrap_or(true),
        }
    }
}

/// Linha do livro de preços (somente inserção).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProductPriceHistory {
    pub id: i64,
    pub product_id: i64,
    pub old_price_kopeck: i64,
    pub new_price_kopeck: i64,
    pub updated_by: i64,
    pub changed_at: DateTime<Utc>,
}

/// Uma transição de preço a ser registrada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceChange {
    pub product_id: i64,
    pub old_price_kopeck: i64,
    pub new_price_kopeck: i64,
    pub updated_by: i64,
}
