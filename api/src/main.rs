mod config;
mod constants;
mod domain;
mod models;
mod routes;
mod services;

use anyhow::Context;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::AppConfig;
use services::catalog::{Catalog, PgVideoStore};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub app_name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,video_catalog=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = AppConfig::from_env();

    // Postgres when DATABASE_URL is set, otherwise an in-memory catalog
    let catalog = match &cfg.database_url {
        Some(database_url) => {
            let pool = services::db::connect(database_url, cfg.max_connections)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Using Postgres video store");
            Catalog::new(Arc::new(PgVideoStore::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, videos are kept in memory only");
            Catalog::in_memory()
        }
    };

    let videos = catalog.count().await.context("Failed to count videos")?;
    tracing::info!(videos, "Catalog ready");

    let state = Arc::new(AppState {
        catalog,
        app_name: cfg.app_name.clone(),
    });

    let app = routes::build_routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = cfg.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
