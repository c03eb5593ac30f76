//! Repository for the `orders` table and its `order_products` association.

use std::collections::HashMap;

use orderdesk_core::aggregate;
use orderdesk_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::order::{CreateOrder, Order, OrderLineRow, OrderRow};
use crate::models::product::Product;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, customer_id, date, status";

/// Association rows joined with their products, for a batch of orders.
const LINES_QUERY: &str = "SELECT op.order_id, p.id, p.name, p.price, p.available
     FROM order_products op
     JOIN products p ON p.id = op.product_id
     WHERE op.order_id = ANY($1)
     ORDER BY op.order_id, p.id";

/// Provides CRUD operations for orders and their association sets.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert an order and its association set in one transaction.
    ///
    /// The customer and products must exist; a dangling reference surfaces
    /// as a foreign-key violation and nothing is written.
    pub async fn create(pool: &PgPool, input: &CreateOrder) -> Result<Order, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let order = Self::create_in(&mut tx, input).await?;
        tx.commit().await?;
        Ok(order)
    }

    /// Insert an order and its association set on a connection the caller
    /// controls, typically an open transaction.
    pub async fn create_in(
        conn: &mut PgConnection,
        input: &CreateOrder,
    ) -> Result<Order, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders (customer_id, date, status)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(input.customer_id)
            .bind(input.date)
            .bind(input.status.as_str())
            .fetch_one(&mut *conn)
            .await?;

        Self::insert_lines(&mut *conn, row.id, &input.product_ids).await?;
        Self::load_one(conn, row).await
    }

    /// Find an order by its internal ID, with its current association set.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match row {
            Some(row) => {
                let mut conn = pool.acquire().await?;
                Ok(Some(Self::load_one(&mut conn, row).await?))
            }
            None => Ok(None),
        }
    }

    /// List all orders ordered by ID ascending, each with its association set.
    pub async fn list(pool: &PgPool) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders ORDER BY id ASC");
        let rows = sqlx::query_as::<_, OrderRow>(&query)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let mut lines: HashMap<DbId, Vec<Product>> = HashMap::new();
        for line in Self::fetch_lines(pool, &ids).await? {
            lines.entry(line.order_id).or_default().push(line.into());
        }

        rows.into_iter()
            .map(|row| {
                let products = lines.remove(&row.id).unwrap_or_default();
                assemble(row, products)
            })
            .collect()
    }

    /// Overwrite every field of an order and replace its association set.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateOrder,
    ) -> Result<Option<Order>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE orders SET customer_id = $2, date = $3, status = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(row) = sqlx::query_as::<_, OrderRow>(&query)
            .bind(id)
            .bind(input.customer_id)
            .bind(input.date)
            .bind(input.status.as_str())
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM order_products WHERE order_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        Self::insert_lines(&mut tx, id, &input.product_ids).await?;
        let order = Self::load_one(&mut tx, row).await?;

        tx.commit().await?;
        Ok(Some(order))
    }

    /// Delete an order by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every order. Returns the count of removed rows.
    pub async fn delete_all<'e, E>(executor: E) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM orders").execute(executor).await?;
        Ok(result.rows_affected())
    }

    /// Count the orders placed by a customer.
    pub async fn count_for_customer(pool: &PgPool, customer_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE customer_id = $1")
            .bind(customer_id)
            .fetch_one(pool)
            .await
    }

    // -------------------------------------------------------------------------
    // Association set
    // -------------------------------------------------------------------------

    /// Attach products to an order. Already-attached products are ignored.
    pub async fn add_products(
        pool: &PgPool,
        order_id: DbId,
        product_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::insert_lines(&mut conn, order_id, product_ids).await
    }

    /// Detach a product from an order. Returns `true` if it was attached.
    pub async fn remove_product(
        pool: &PgPool,
        order_id: DbId,
        product_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM order_products WHERE order_id = $1 AND product_id = $2")
                .bind(order_id)
                .bind(product_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Read the current association set of an order, sorted by product id.
    pub async fn products_for(pool: &PgPool, order_id: DbId) -> Result<Vec<Product>, sqlx::Error> {
        let lines = Self::fetch_lines(pool, &[order_id]).await?;
        Ok(lines.into_iter().map(Product::from).collect())
    }

    /// Sum of the prices currently associated with the order.
    ///
    /// Re-reads the association set on every call.
    pub async fn total_price(pool: &PgPool, order_id: DbId) -> Result<Decimal, sqlx::Error> {
        let products = Self::products_for(pool, order_id).await?;
        Ok(aggregate::total_price(&products))
    }

    /// Whether every product currently associated with the order is available.
    ///
    /// Re-reads the association set on every call.
    pub async fn can_be_fulfilled(pool: &PgPool, order_id: DbId) -> Result<bool, sqlx::Error> {
        let products = Self::products_for(pool, order_id).await?;
        Ok(aggregate::can_be_fulfilled(&products))
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    async fn insert_lines(
        conn: &mut PgConnection,
        order_id: DbId,
        product_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        if product_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query(
            "INSERT INTO order_products (order_id, product_id)
             SELECT $1, UNNEST($2::BIGINT[])
             ON CONFLICT DO NOTHING",
        )
        .bind(order_id)
        .bind(product_ids)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    async fn fetch_lines<'e, E>(executor: E, order_ids: &[DbId]) -> Result<Vec<OrderLineRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, OrderLineRow>(LINES_QUERY)
            .bind(order_ids)
            .fetch_all(executor)
            .await
    }

    async fn load_one(conn: &mut PgConnection, row: OrderRow) -> Result<Order, sqlx::Error> {
        let products = Self::fetch_lines(&mut *conn, &[row.id])
            .await?
            .into_iter()
            .map(Product::from)
            .collect();
        assemble(row, products)
    }
}

/// Combine a row with its products, parsing the stored status literal.
fn assemble(row: OrderRow, products: Vec<Product>) -> Result<Order, sqlx::Error> {
    let status = row
        .status
        .parse()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    Ok(Order {
        id: row.id,
        customer_id: row.customer_id,
        date: row.date,
        status,
        products,
    })
}
