use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates the PostgreSQL connection pool. The pool is owned by `main`,
/// which closes it on shutdown; no module holds global connection state.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Drains and closes the pool. Called from `main` after the server exits.
pub async fn close_pool(pool: &PgPool) {
    info!("Closing PostgreSQL connection pool");
    pool.close().await;
}
