// src/routes.rs

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use anyhow::Context;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::{AppState, Config},
    docs::ApiDoc,
    handlers,
    middleware::auth::auth_guard,
};

/// Monta o router completo da API, com CORS, tracing e Swagger.
pub fn router(app_state: AppState) -> anyhow::Result<Router> {
    let cors = build_cors_layer(&app_state.config)?;

    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/sign-up", post(handlers::auth::sign_up))
        .route("/sign-in", post(handlers::auth::sign_in))
        .route("/token-refresh", post(handlers::auth::token_refresh));

    // Rotas do painel (protegidas pelo middleware)
    let admin_routes = Router::new()
        .route("/brands"
               ,post(handlers::brands::create_brand)
               .get(handlers::brands::list_brands)
        )
        .route("/brands/{id}"
               ,get(handlers::brands::get_brand)
               .put(handlers::brands::update_brand)
               .delete(handlers::brands::delete_brand)
        )
        .route("/categories"
               ,post(handlers::categories::create_category)
               .get(handlers::categories::list_categories)
        )
        .route("/categories/{id}"
               ,get(handlers::categories::get_category)
               .put(handlers::categories::update_category)
               .delete(handlers::categories::delete_category)
        )
        .route("/products"
               ,post(handlers::products::create_product)
               .get(handlers::products::list_products)
        )
        .route("/products/{id}"
               ,get(handlers::products::get_product)
               .put(handlers::products::update_product)
               .delete(handlers::products::delete_product)
        )
        .route("/products/{id}/priceHistory", get(handlers::products::get_price_history))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Vitrine: só leitura, sem autenticação
    let front_routes = Router::new()
        .route("/health", get(handlers::front::health))
        .route("/brands", get(handlers::front::list_brands))
        .route("/categories", get(handlers::front::list_categories))
        .route("/products", get(handlers::front::list_products));

    let app = Router::new()
        .nest("/api/v1/admin", auth_routes.merge(admin_routes))
        .nest("/api/v1/front", front_routes)
        .merge(SwaggerUi::new("/api/v1/swagger").url("/api/v1/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    Ok(app)
}

fn build_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = config
        .cors_allowed_origin
        .parse()
        .with_context(|| format!("CORS_ALLOWED_ORIGIN inválida: {}", config.cors_allowed_origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true))
}
