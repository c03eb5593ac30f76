//! Orderdesk domain logic.
//!
//! Everything in this crate is pure: no database, no HTTP. The `db` and `api`
//! crates call into these modules on every write and every derived read.

pub mod access;
pub mod aggregate;
pub mod error;
pub mod order_status;
pub mod roles;
pub mod types;
pub mod validation;
