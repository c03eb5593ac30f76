//! Handlers for the `/token` resource (obtain and refresh a token pair).

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use orderdesk_core::access::Role;
use orderdesk_core::error::CoreError;
use orderdesk_core::types::DbId;
use orderdesk_db::models::session::CreateSession;
use orderdesk_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/token`.
#[derive(Debug, Deserialize)]
pub struct TokenObtainRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /api/token/refresh`.
#[derive(Debug, Deserialize)]
pub struct TokenRefreshRequest {
    pub refresh: String,
}

/// Token pair returned by obtain and refresh.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

fn bad_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "No active account found with the given credentials".into(),
    ))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/token
///
/// Authenticate with username + password. Returns an access and refresh token.
pub async fn obtain(
    State(state): State<AppState>,
    AppJson(input): AppJson<TokenObtainRequest>,
) -> AppResult<Json<TokenPair>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(bad_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    // Inactive accounts get the same answer as a wrong password.
    if !password_valid || !user.is_active {
        tracing::info!(username = %input.username, "Token request rejected");
        return Err(bad_credentials());
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;

    let role = RoleRepo::role_of_user(&state.pool, user.id)
        .await?
        .ok_or_else(bad_credentials)?;
    let pair = issue_token_pair(&state, user.id, role).await?;

    tracing::info!(user_id = user.id, %role, "Token pair issued");
    Ok(Json(pair))
}

/// POST /api/token/refresh
///
/// Exchange a valid refresh token for a new pair. The presented refresh
/// token is revoked and cannot be used again.
pub async fn refresh(
    State(state): State<AppState>,
    AppJson(input): AppJson<TokenRefreshRequest>,
) -> AppResult<Json<TokenPair>> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid or expired refresh token".into()));

    let token_hash = hash_refresh_token(&input.refresh);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(invalid)?;

    // A concurrent refresh may have rotated the same session first.
    if !SessionRepo::revoke(&state.pool, session.id).await? {
        return Err(invalid());
    }

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(invalid)?;

    let role = RoleRepo::role_of_user(&state.pool, user.id)
        .await?
        .ok_or_else(invalid)?;
    let pair = issue_token_pair(&state, user.id, role).await?;

    tracing::info!(user_id = user.id, "Token pair rotated");
    Ok(Json(pair))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens and persist a session row for the refresh token.
async fn issue_token_pair(state: &AppState, user_id: DbId, role: Role) -> AppResult<TokenPair> {
    let jwt = &state.config.jwt;

    let access = generate_access_token(user_id, role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let session = CreateSession {
        user_id,
        refresh_token_hash: refresh_hash,
        expires_at: Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days),
    };
    SessionRepo::create(&state.pool, &session).await?;

    Ok(TokenPair {
        access,
        refresh: refresh_plaintext,
        expires_in: jwt.access_token_expiry_mins * 60,
    })
}
