// src/handlers/front.rs

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{brand::Brand, category::Category, product::Product},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "up")]
    pub status: &'static str,
}

#[utoipa::path(
    get,
    path = "/api/v1/front/health",
    tag = "Front",
    responses(
        (status = 200, description = "Banco acessível", body = HealthStatus),
        (status = 503, description = "Banco inacessível", body = HealthStatus)
    )
)]
pub async fn health(State(app_state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    match app_state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthStatus { status: "up" })),
        Err(err) => {
            tracing::error!(error = %err, "health check falhou");
            (StatusCode::SERVICE_UNAVAILABLE, Json(HealthStatus { status: "down" }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/front/brands",
    tag = "Front",
    responses((status = 200, description = "Marcas", body = Vec<Brand>))
)]
pub async fn list_brands(State(app_state): State<AppState>) -> Result<Json<Vec<Brand>>, AppError> {
    Ok(Json(app_state.brand_service.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/front/categories",
    tag = "Front",
    responses((status = 200, description = "Categorias", body = Vec<Category>))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(app_state.category_service.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/front/products",
    tag = "Front",
    responses((status = 200, description = "Produtos ativos", body = Vec<Product>))
)]
pub async fn list_products(State(app_state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(app_state.product_service.list_active().await?))
}
