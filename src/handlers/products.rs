// src/handlers/products.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::Actor,
    models::product::{Product, ProductPayload, ProductPriceHistory},
};

#[utoipa::path(
    post,
    path = "/api/v1/admin/products",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto criado com o primeiro registro de preço", body = Product),
        (status = 404, description = "Marca ou categoria não encontrada"),
        (status = 409, description = "Slug já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    Actor(actor): Actor,
    WithRejection(Json(payload), _): WithRejection<Json<ProductPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let product = app_state.product_service.create(actor, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/products",
    tag = "Products",
    responses((status = 200, description = "Todos os produtos", body = Vec<Product>)),
    security(("api_jwt" = []))
)]
pub async fn list_products(State(app_state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(app_state.product_service.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto", body = Product),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(app_state.product_service.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "ID do produto")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto, marca ou categoria não encontrado"),
        (status = 409, description = "Slug já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    Actor(actor): Actor,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<ProductPayload>, AppError>,
) -> Result<Json<Product>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.product_service.update(actor, id, payload.into()).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto removido"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<StatusCode, AppError> {
    app_state.product_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/products/{id}/priceHistory",
    tag = "Products",
    params(("id" = i64, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Histórico de preços em ordem cronológica", body = Vec<ProductPriceHistory>),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_price_history(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<Json<Vec<ProductPriceHistory>>, AppError> {
    Ok(Json(app_state.product_service.price_history(id).await?))
}
