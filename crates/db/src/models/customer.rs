//! Customer entity model and DTOs.

use orderdesk_core::types::DbId;
use orderdesk_core::validation::{CustomerDraft, ValidCustomer};
use serde::Serialize;
use sqlx::FromRow;

/// A customer row from the `customers` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub name: String,
    pub address: String,
}

impl Customer {
    pub fn to_draft(&self) -> CustomerDraft {
        CustomerDraft {
            name: Some(self.name.clone()),
            address: Some(self.address.clone()),
        }
    }
}

/// DTO for creating a new customer.
#[derive(Debug, Clone)]
pub struct CreateCustomer {
    pub name: String,
    pub address: String,
}

impl From<ValidCustomer> for CreateCustomer {
    fn from(valid: ValidCustomer) -> Self {
        Self {
            name: valid.name,
            address: valid.address,
        }
    }
}

/// DTO for updating an existing customer. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateCustomer {
    pub name: Option<String>,
    pub address: Option<String>,
}

impl From<ValidCustomer> for UpdateCustomer {
    fn from(valid: ValidCustomer) -> Self {
        Self {
            name: Some(valid.name),
            address: Some(valid.address),
        }
    }
}
