use crate::config::{Config, LogFormat};
use crate::routes::app;
use crate::store::{HoldingStore, MemoryStore, SqliteStore};
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod calculator;
mod config;
mod error;
mod portfolio;
mod routes;
mod store;

fn init_tracing(format: &LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

fn build_store(config: &Config) -> anyhow::Result<Arc<dyn HoldingStore>> {
    match &config.database_path {
        Some(path) => {
            tracing::info!("Storing holdings in {}", path.display());
            Ok(Arc::new(SqliteStore::open(path)?))
        }
        None => {
            tracing::warn!("DATABASE_PATH not set, holdings are kept in memory");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    init_tracing(&config.log_format);

    let store = build_store(&config)?;
    let app = app(store);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    tracing::info!("Listening on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
