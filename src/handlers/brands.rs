// src/handlers/brands.rs

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
    models::brand::{Brand, BrandPayload},
};

#[utoipa::path(
    post,
    path = "/api/v1/admin/brands",
    tag = "Brands",
    request_body = BrandPayload,
    responses(
        (status = 201, description = "Marca criada", body = Brand),
        (status = 409, description = "Nome ou slug já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_brand(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<BrandPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let brand = app_state.brand_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(brand)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/brands",
    tag = "Brands",
    responses((status = 200, description = "Todas as marcas", body = Vec<Brand>)),
    security(("api_jwt" = []))
)]
pub async fn list_brands(State(app_state): State<AppState>) -> Result<Json<Vec<Brand>>, AppError> {
    Ok(Json(app_state.brand_service.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/brands/{id}",
    tag = "Brands",
    params(("id" = i64, Path, description = "ID da marca")),
    responses(
        (status = 200, description = "Marca", body = Brand),
        (status = 404, description = "Marca não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_brand(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<Json<Brand>, AppError> {
    Ok(Json(app_state.brand_service.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/brands/{id}",
    tag = "Brands",
    params(("id" = i64, Path, description = "ID da marca")),
    request_body = BrandPayload,
    responses(
        (status = 200, description = "Marca atualizada", body = Brand),
        (status = 404, description = "Marca não encontrada"),
        (status = 409, description = "Nome ou slug já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_brand(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<BrandPayload>, AppError>,
) -> Result<Json<Brand>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.brand_service.update(id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/brands/{id}",
    tag = "Brands",
    params(("id" = i64, Path, description = "ID da marca")),
    responses(
        (status = 204, description = "Marca removida"),
        (status = 404, description = "Marca não encontrada"),
        (status = 422, description = "Marca ainda usada por produtos")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_brand(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<StatusCode, AppError> {
    app_state.brand_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
