// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;

use crate::{
    db::CatalogStore,
    services::{
        auth::{AuthService, TokenSettings},
        brand_service::BrandService,
        category_service::CategoryService,
        product_service::ProductService,
    },
};

/// Configuração carregada das variáveis de ambiente (com suporte a `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Prazo de cada operação transacional.
    pub tx_timeout_secs: u64,
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_days: i64,
    pub bcrypt_cost: u32,
    pub cors_allowed_origin: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de busca qualquer.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| {
            lookup(key).with_context(|| format!("{key} deve ser definida"))
        };
        let text_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            host: text_or("APP_HOST", "0.0.0.0"),
            port: parse_or(&lookup, "APP_PORT", 3000)?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout_secs: parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 3)?,
            tx_timeout_secs: parse_or(&lookup, "TX_TIMEOUT_SECS", 3)?,
            access_token_ttl_minutes: parse_or(&lookup, "ACCESS_TOKEN_TTL_MINUTES", 15)?,
            refresh_token_ttl_days: parse_or(&lookup, "REFRESH_TOKEN_TTL_DAYS", 7)?,
            bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            cors_allowed_origin: text_or("CORS_ALLOWED_ORIGIN", "http://localhost:5173"),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn tx_timeout(&self) -> Duration {
        Duration::from_secs(self.tx_timeout_secs)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} inválida: {raw:?}")),
        None => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn CatalogStore>,
    pub auth_service: AuthService,
    pub brand_service: BrandService,
    pub category_service: CategoryService,
    pub product_service: ProductService,
}

impl AppState {
    // --- Monta o gráfico de dependências ---
    pub fn new(config: Config, store: Arc<dyn CatalogStore>) -> Self {
        let tokens = TokenSettings {
            secret: config.jwt_secret.clone(),
            access_ttl: chrono::Duration::minutes(config.access_token_ttl_minutes),
            refresh_ttl: chrono::Duration::days(config.refresh_token_ttl_days),
            bcrypt_cost: config.bcrypt_cost,
        };
        let tx_timeout = config.tx_timeout();

        Self {
            auth_service: AuthService::new(store.clone(), tokens),
            brand_service: BrandService::new(store.clone()),
            category_service: CategoryService::new(store.clone(), tx_timeout),
            product_service: ProductService::new(store.clone(), tx_timeout),
            config: Arc::new(config),
            store,
        }
    }
}
