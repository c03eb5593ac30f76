//! Order entity model and DTOs.

use orderdesk_core::aggregate;
use orderdesk_core::order_status::OrderStatus;
use orderdesk_core::types::{DbId, OrderDate};
use orderdesk_core::validation::{OrderDraft, ValidOrder};
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::models::product::Product;

/// An order row from the `orders` table, before the status literal is parsed.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: DbId,
    pub customer_id: DbId,
    pub date: OrderDate,
    pub status: String,
}

/// One row of the association set joined with its product.
#[derive(Debug, Clone, FromRow)]
pub struct OrderLineRow {
    pub order_id: DbId,
    pub id: DbId,
    pub name: String,
    pub price: Decimal,
    pub available: bool,
}

impl From<OrderLineRow> for Product {
    fn from(row: OrderLineRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
            available: row.available,
        }
    }
}

/// An order together with the association set read alongside it.
///
/// `products` is a snapshot taken when the order was loaded. For a fresh
/// reading use `OrderRepo::total_price` / `OrderRepo::can_be_fulfilled`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: DbId,
    pub customer_id: DbId,
    pub date: OrderDate,
    pub status: OrderStatus,
    /// Sorted by product id.
    pub products: Vec<Product>,
}

impl Order {
    pub fn product_ids(&self) -> Vec<DbId> {
        self.products.iter().map(|p| p.id).collect()
    }

    pub fn total_price(&self) -> Decimal {
        aggregate::total_price(&self.products)
    }

    pub fn can_be_fulfilled(&self) -> bool {
        aggregate::can_be_fulfilled(&self.products)
    }

    pub fn to_draft(&self) -> OrderDraft {
        OrderDraft {
            customer: Some(self.customer_id),
            products: Some(self.product_ids()),
            date: Some(self.date),
            status: Some(self.status.as_str().to_string()),
        }
    }
}

/// DTO for inserting an order and its association set in one transaction.
///
/// Also used for full replacement on update: every field is written.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub customer_id: DbId,
    pub date: OrderDate,
    pub status: OrderStatus,
    pub product_ids: Vec<DbId>,
}

impl From<ValidOrder> for CreateOrder {
    fn from(valid: ValidOrder) -> Self {
        Self {
            customer_id: valid.customer,
            date: valid.date,
            status: valid.status,
            product_ids: valid.products,
        }
    }
}
