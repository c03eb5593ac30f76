//! Well-known role name constants.
//!
//! These must match the seed rows in `20250104000001_create_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
