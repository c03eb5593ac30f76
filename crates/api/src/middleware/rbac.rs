//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and runs the caller through
//! [`authorize`] for the kind of operation the route performs. Use these in
//! route handlers to enforce authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use orderdesk_core::access::{authorize, Operation, Principal};
use orderdesk_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 401 when unauthenticated and
/// 403 Forbidden for any other role.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(principal): RequireAdmin) -> AppResult<Json<()>> {
///     // principal is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub Principal);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = authorized(parts, state, Operation::Update).await?;
        Ok(RequireAdmin(principal))
    }
}

/// Requires any authenticated caller (any valid role).
///
/// Grants the read operations of every resource collection.
///
/// ```ignore
/// async fn any_authed(RequireAuth(principal): RequireAuth) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAuth(pub Principal);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = authorized(parts, state, Operation::Retrieve).await?;
        Ok(RequireAuth(principal))
    }
}

/// Extract the principal and check it against the policy for `op`.
async fn authorized(
    parts: &mut Parts,
    state: &AppState,
    op: Operation,
) -> Result<Principal, AppError> {
    let AuthUser(principal) = AuthUser::from_request_parts(parts, state).await?;
    authorize(Some(&principal), op).map_err(|e| {
        tracing::debug!(user_id = principal.user_id, role = %principal.role, ?op, "Access denied");
        AppError::Core(CoreError::from(e))
    })?;
    Ok(principal)
}
