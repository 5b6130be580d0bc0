// src/middleware/auth.rs

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};

use crate::{common::error::AppError, config::AppState};

/// Administrador autenticado, colocado nas extensions pelo [`auth_guard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedAdmin {
    pub id: i64,
}

// O middleware em si
pub async fn auth_guard(
    State(app_state): State<AppState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.map_err(|rejection| {
        AppError::Unauthorized(anyhow::Error::new(rejection).context("missing bearer token"))
    })?;

    let id = app_state.auth_service.validate_access_token(bearer.token())?;

    // Insere o administrador nos "extensions" da requisição
    request.extensions_mut().insert(AuthenticatedAdmin { id });
    Ok(next.run(request).await)
}

/// Quem está fazendo a requisição, se houver alguém autenticado.
///
/// Nunca rejeita: a ausência só vira erro quando um serviço precisa atribuir
/// uma escrita a alguém.
#[derive(Debug, Clone, Copy)]
pub struct Actor(pub Option<i64>);

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Actor(
            parts
                .extensions
                .get::<AuthenticatedAdmin>()
                .map(|admin| admin.id),
        ))
    }
}
