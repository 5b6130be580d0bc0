// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::sign_up,
        handlers::auth::sign_in,
        handlers::auth::token_refresh,

        // --- Brands ---
        handlers::brands::create_brand,
        handlers::brands::list_brands,
        handlers::brands::get_brand,
        handlers::brands::update_brand,
        handlers::brands::delete_brand,

        // --- Categories ---
        handlers::categories::create_category,
        handlers::categories::list_categories,
        handlers::categories::get_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,

        // --- Products ---
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::products::get_price_history,

        // --- Front ---
        handlers::front::health,
        handlers::front::list_brands,
        handlers::front::list_categories,
        handlers::front::list_products,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::SignUpPayload,
            models::auth::SignInPayload,
            models::auth::TokenRefreshPayload,
            models::auth::TokenPair,

            // --- Catálogo ---
            models::brand::Brand,
            models::brand::BrandPayload,
            models::category::Category,
            models::category::CategoryPayload,
            models::product::Product,
            models::product::ProductPayload,
            models::product::ProductPriceHistory,

            handlers::front::HealthStatus,
        )
    ),
    tags(
        (name = "Auth", description = "Cadastro e login de administradores"),
        (name = "Brands", description = "Gestão de Marcas"),
        (name = "Categories", description = "Árvore de Categorias"),
        (name = "Products", description = "Produtos e Histórico de Preços"),
        (name = "Front", description = "Leitura pública da vitrine")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
