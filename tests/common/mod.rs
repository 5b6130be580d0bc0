#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method, Request, Response, StatusCode,
    },
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use catalog_admin::{
    config::{AppState, Config},
    db::MemoryCatalogStore,
    routes,
};

/// Configuração de teste: bcrypt barato e nenhum banco real.
pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".into(),
        jwt_secret: "integration-secret".into(),
        host: "127.0.0.1".into(),
        port: 0,
        db_max_connections: 1,
        db_acquire_timeout_secs: 1,
        tx_timeout_secs: 3,
        access_token_ttl_minutes: 15,
        refresh_token_ttl_days: 7,
        bcrypt_cost: 4,
        cors_allowed_origin: "http://localhost:5173".into(),
    }
}

/// Router completo sobre um store em memória; o store volta junto para
/// inspeção direta.
pub fn build_test_app() -> (Router, MemoryCatalogStore) {
    let store = MemoryCatalogStore::new();
    let state = AppState::new(test_config(), Arc::new(store.clone()));
    let app = routes::router(state).expect("router builds");
    (app, store)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Cadastra um administrador e devolve o par de tokens em JSON.
pub async fn sign_up(app: &Router) -> Value {
    let response = send(
        app,
        Method::POST,
        "/api/v1/admin/sign-up",
        None,
        Some(json!({ "email": "admin@example.com", "password": "correct horse" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

pub async fn access_token(app: &Router) -> String {
    sign_up(app).await["access_token"].as_str().unwrap().to_string()
}

/// POST autenticado que espera 201 e devolve o `id` criado.
pub async fn create(app: &Router, token: &str, uri: &str, body: Value) -> i64 {
    let response = send(app, Method::POST, uri, Some(token), Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri}");
    body_json(response).await["id"].as_i64().unwrap()
}
