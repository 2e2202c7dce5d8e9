//! Database setup
//!
//! Queries live in `domain::videos` and use sqlx's generic Executor trait, so
//! they accept both `&PgPool` and `&mut PgConnection` (transactions). This
//! module only owns pool creation and schema migrations.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::services::catalog::StoreError;

/// Connect to Postgres and bring the schema up to date
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    tracing::info!("Running database migrations");
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
