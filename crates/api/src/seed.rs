//! Sample data for development databases.
//!
//! Wipes orders, customers and products, then writes a small fixed catalogue.
//! Every entity goes through the same validation rules as the API before it
//! is stored.

use std::str::FromStr;

use anyhow::Context;
use chrono::Utc;
use orderdesk_core::access::Role;
use orderdesk_core::order_status::OrderStatus;
use orderdesk_core::types::DbId;
use orderdesk_core::validation::{CustomerDraft, OrderDraft, ProductDraft};
use orderdesk_db::models::customer::CreateCustomer;
use orderdesk_db::models::order::CreateOrder;
use orderdesk_db::models::product::CreateProduct;
use orderdesk_db::models::user::CreateUser;
use orderdesk_db::repositories::{CustomerRepo, OrderRepo, ProductRepo, RoleRepo, UserRepo};
use orderdesk_db::DbPool;
use rust_decimal::Decimal;
use sqlx::PgConnection;

use crate::auth::password::hash_password;

/// `(name, price, available)`
pub type SampleProduct = (&'static str, &'static str, bool);

/// `(name, address)`
pub type SampleCustomer = (&'static str, &'static str);

/// `(customer index, status, product indexes)`
pub type SampleOrder = (usize, OrderStatus, &'static [usize]);

/// A fixed catalogue to write. Orders refer to customers and products by
/// their position in this set.
#[derive(Debug, Clone, Copy)]
pub struct SampleData {
    pub products: &'static [SampleProduct],
    pub customers: &'static [SampleCustomer],
    pub orders: &'static [SampleOrder],
}

impl SampleData {
    /// The development data set.
    pub const DEFAULT: SampleData = SampleData {
        products: &[
            ("Product 1", "19.99", true),
            ("Product 2", "29.99", true),
            ("Product 3", "39.99", false),
        ],
        customers: &[
            ("Customer 1", "123 Main St"),
            ("Customer 2", "456 Elm St"),
            ("Customer 3", "789 Oak St"),
        ],
        orders: &[
            (0, OrderStatus::New, &[0, 1]),
            (1, OrderStatus::InProcess, &[1, 2]),
            (2, OrderStatus::Completed, &[0, 2]),
        ],
    };
}

/// Credentials for an optional admin account created alongside the data.
#[derive(Debug, Clone)]
pub struct SeedAdmin {
    pub username: String,
    pub password: String,
}

/// What a seed run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub products: Vec<DbId>,
    pub customers: Vec<DbId>,
    pub orders: Vec<DbId>,
    pub admin: Option<DbId>,
}

/// Replace the catalogue with the sample data set.
pub async fn seed_sample_data(
    pool: &DbPool,
    admin: Option<&SeedAdmin>,
) -> anyhow::Result<SeedSummary> {
    seed(pool, &SampleData::DEFAULT, admin).await
}

/// Replace the catalogue with `data`.
///
/// The wipe and every insert share one transaction: on any failure the
/// previous catalogue is left untouched.
pub async fn seed(
    pool: &DbPool,
    data: &SampleData,
    admin: Option<&SeedAdmin>,
) -> anyhow::Result<SeedSummary> {
    let mut tx = pool.begin().await?;

    let deleted_orders = OrderRepo::delete_all(&mut *tx).await?;
    let deleted_customers = CustomerRepo::delete_all(&mut *tx).await?;
    let deleted_products = ProductRepo::delete_all(&mut *tx).await?;
    tracing::info!(
        deleted_orders,
        deleted_customers,
        deleted_products,
        "Cleared existing data"
    );

    let mut products = Vec::with_capacity(data.products.len());
    for &(name, price, available) in data.products {
        let draft = ProductDraft {
            name: Some(name.to_string()),
            price: Some(Decimal::from_str(price)?),
            available: Some(available),
        };
        let valid = draft
            .validate()
            .with_context(|| format!("sample product {name:?} is invalid"))?;
        let product = ProductRepo::create(&mut *tx, &CreateProduct::from(valid)).await?;
        products.push(product.id);
    }

    let mut customers = Vec::with_capacity(data.customers.len());
    for &(name, address) in data.customers {
        let draft = CustomerDraft {
            name: Some(name.to_string()),
            address: Some(address.to_string()),
        };
        let valid = draft
            .validate()
            .with_context(|| format!("sample customer {name:?} is invalid"))?;
        let customer = CustomerRepo::create(&mut *tx, &CreateCustomer::from(valid)).await?;
        customers.push(customer.id);
    }

    let today = Utc::now().date_naive();
    let mut orders = Vec::with_capacity(data.orders.len());
    for &(customer, status, lines) in data.orders {
        let customer = *customers
            .get(customer)
            .with_context(|| format!("sample order refers to missing customer #{customer}"))?;
        let lines = lines
            .iter()
            .map(|&i| {
                products
                    .get(i)
                    .copied()
                    .with_context(|| format!("sample order refers to missing product #{i}"))
            })
            .collect::<anyhow::Result<Vec<DbId>>>()?;
        let draft = OrderDraft {
            customer: Some(customer),
            products: Some(lines),
            date: Some(today),
            status: Some(status.as_str().to_string()),
        };
        let valid = draft
            .validate()
            .with_context(|| format!("sample order with status {status} is invalid"))?;
        let order = OrderRepo::create_in(&mut tx, &CreateOrder::from(valid)).await?;
        orders.push(order.id);
    }

    let admin = match admin {
        Some(admin) => Some(ensure_admin(&mut tx, admin).await?),
        None => None,
    };

    tx.commit().await?;

    tracing::info!(
        products = products.len(),
        customers = customers.len(),
        orders = orders.len(),
        "Sample data created"
    );

    Ok(SeedSummary {
        products,
        customers,
        orders,
        admin,
    })
}

/// Create the admin account unless the username is already taken.
async fn ensure_admin(conn: &mut PgConnection, admin: &SeedAdmin) -> anyhow::Result<DbId> {
    if let Some(existing) = UserRepo::find_by_username(&mut *conn, &admin.username).await? {
        tracing::info!(user_id = existing.id, "Admin account already exists");
        return Ok(existing.id);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| anyhow::anyhow!("failed to hash admin password: {e}"))?;
    let role_id = RoleRepo::id_of(&mut *conn, Role::Admin).await?;
    let user = UserRepo::create(
        &mut *conn,
        &CreateUser {
            username: admin.username.clone(),
            password_hash,
            role_id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Admin account created");
    Ok(user.id)
}
