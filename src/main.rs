//src/main.rs

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use catalog_admin::{
    config::{AppState, Config},
    db::{self, PgCatalogStore},
    routes,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Carrega o .env antes do logger para que RUST_LOG também venha dele
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_admin=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();

    let pool = db::connect(&config).await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let addr = config.addr();
    let app_state = AppState::new(config, Arc::new(PgCatalogStore::new(pool)));
    let app = routes::router(app_state)?;

    // Inicia o servidor
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    tracing::info!("📚 Swagger em http://{}/api/v1/swagger", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Servidor encerrado");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("🔥 Falha ao instalar o handler de Ctrl-C: {:?}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Ctrl-C recebido, encerrando...");
}
