//! Persistence layer: sqlx models, repositories and pool helpers.

pub mod models;
pub mod repositories;

use serde::Serialize;
use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to prove the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Row counts of the catalogue tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct CatalogCounts {
    pub products: i64,
    pub customers: i64,
    pub orders: i64,
}

/// Count products, customers and orders in a single round trip.
pub async fn catalog_counts(pool: &DbPool) -> Result<CatalogCounts, sqlx::Error> {
    sqlx::query_as::<_, CatalogCounts>(
        "SELECT (SELECT COUNT(*) FROM products) AS products,
                (SELECT COUNT(*) FROM customers) AS customers,
                (SELECT COUNT(*) FROM orders) AS orders",
    )
    .fetch_one(pool)
    .await
}

/// Apply every pending migration from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await?;
    tracing::debug!("Migrations up to date");
    Ok(())
}
