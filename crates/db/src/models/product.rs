//! Product entity model and DTOs.

use orderdesk_core::aggregate::OrderLine;
use orderdesk_core::types::DbId;
use orderdesk_core::validation::{ProductDraft, ValidProduct};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A product row from the `products` table.
///
/// `price` serializes as a decimal string (`"19.99"`).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub price: Decimal,
    pub available: bool,
}

impl Product {
    /// The stored values as a draft, used as the base for partial updates.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: Some(self.name.clone()),
            price: Some(self.price),
            available: Some(self.available),
        }
    }
}

impl OrderLine for Product {
    fn price(&self) -> Decimal {
        self.price
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

/// DTO for creating a new product.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub price: Decimal,
    /// Column default (`true`) applies when `None`.
    pub available: Option<bool>,
}

impl From<ValidProduct> for CreateProduct {
    fn from(valid: ValidProduct) -> Self {
        Self {
            name: valid.name,
            price: valid.price,
            available: Some(valid.available),
        }
    }
}

/// DTO for updating an existing product. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub available: Option<bool>,
}

impl From<ValidProduct> for UpdateProduct {
    fn from(valid: ValidProduct) -> Self {
        Self {
            name: Some(valid.name),
            price: Some(valid.price),
            available: Some(valid.available),
        }
    }
}
