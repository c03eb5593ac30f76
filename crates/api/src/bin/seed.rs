//! # Sample Data Seeder
//!
//! Replaces orders, customers and products with a small fixed data set.
//!
//! ## Usage
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p orderdesk-api --bin orderdesk-seed
//!
//! # Also create an admin account
//! SEED_ADMIN_USERNAME=admin SEED_ADMIN_PASSWORD=secret \
//!     cargo run -p orderdesk-api --bin orderdesk-seed
//! ```

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use orderdesk_api::seed::{seed_sample_data, SeedAdmin};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orderdesk_api=info,orderdesk_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = orderdesk_db::create_pool(&database_url, 1)
        .await
        .context("failed to connect to database")?;
    orderdesk_db::run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    let admin = match (
        std::env::var("SEED_ADMIN_USERNAME"),
        std::env::var("SEED_ADMIN_PASSWORD"),
    ) {
        (Ok(username), Ok(password)) if !username.is_empty() && !password.is_empty() => {
            Some(SeedAdmin { username, password })
        }
        _ => None,
    };

    let summary = seed_sample_data(&pool, admin.as_ref()).await?;
    tracing::info!(
        products = ?summary.products,
        customers = ?summary.customers,
        orders = ?summary.orders,
        admin = ?summary.admin,
        "Seeding complete"
    );

    pool.close().await;
    Ok(())
}
