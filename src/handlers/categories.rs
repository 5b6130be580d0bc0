// src/handlers/categories.rs

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
    models::category::{Category, CategoryPayload},
};

#[utoipa::path(
    post,
    path = "/api/v1/admin/categories",
    tag = "Categories",
    request_body = CategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Category),
        (status = 404, description = "Categoria pai não encontrada"),
        (status = 409, description = "Slug já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CategoryPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let category = app_state.category_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/categories",
    tag = "Categories",
    responses((status = 200, description = "Todas as categorias", body = Vec<Category>)),
    security(("api_jwt" = []))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(app_state.category_service.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/categories/{id}",
    tag = "Categories",
    params(("id" = i64, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria", body = Category),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_category(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<Json<Category>, AppError> {
    Ok(Json(app_state.category_service.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/categories/{id}",
    tag = "Categories",
    params(("id" = i64, Path, description = "ID da categoria")),
    request_body = CategoryPayload,
    responses(
        (status = 200, description = "Categoria atualizada", body = Category),
        (status = 404, description = "Categoria ou pai não encontrado"),
        (status = 422, description = "Movimento criaria um ciclo")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_category(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<CategoryPayload>, AppError>,
) -> Result<Json<Category>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.category_service.update(id, &payload).await?))
}

/// Remove a categoria com todas as subcategorias e os produtos delas.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/categories/{id}",
    tag = "Categories",
    params(("id" = i64, Path, description = "ID da categoria")),
    responses(
        (status = 204, description = "Categoria removida em cascata"),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<StatusCode, AppError> {
    app_state.category_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
