// src/handlers/auth.rs

use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{SignInPayload, SignUpPayload, TokenPair, TokenRefreshPayload},
};

#[utoipa::path(
    post,
    path = "/api/v1/admin/sign-up",
    tag = "Auth",
    request_body = SignUpPayload,
    responses(
        (status = 200, description = "Administrador cadastrado", body = TokenPair),
        (status = 400, description = "Payload inválido"),
        (status = 409, description = "Email já cadastrado")
    )
)]
pub async fn sign_up(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<SignUpPayload>, AppError>,
) -> Result<Json<TokenPair>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.auth_service.sign_up(&payload).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/sign-in",
    tag = "Auth",
    request_body = SignInPayload,
    responses(
        (status = 200, description = "Login realizado", body = TokenPair),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn sign_in(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<SignInPayload>, AppError>,
) -> Result<Json<TokenPair>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.auth_service.sign_in(&payload).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/token-refresh",
    tag = "Auth",
    request_body = TokenRefreshPayload,
    responses(
        (status = 200, description = "Novo par de tokens", body = TokenPair),
        (status = 401, description = "Refresh token inválido ou expirado")
    )
)]
pub async fn token_refresh(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<TokenRefreshPayload>, AppError>,
) -> Result<Json<TokenPair>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.auth_service.refresh(&payload.refresh_token).await?))
}
