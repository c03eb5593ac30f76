//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller's [`Principal`] from a JWT Bearer token.
//! - [`rbac::RequireAuth`] -- Read access: any authenticated caller.
//! - [`rbac::RequireAdmin`] -- Write access: the `admin` role.
//!
//! [`Principal`]: orderdesk_core::access::Principal

pub mod auth;
pub mod rbac;
