//! Handlers for the `/auth` resource (register, login, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use cliphub_core::error::CoreError;
use cliphub_core::types::DbId;
use cliphub_db::models::user::{CreateUser, User, UserResponse};
use cliphub_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{
    check_refresh_token, generate_access_token, generate_refresh_token, hash_refresh_token,
    validate_token, RefreshCheck,
};
use crate::auth::password::{hash_password, verify_password, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a new account. Duplicate usernames or emails are rejected by
/// the store's unique constraints (409).
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let username = input.username.trim();
    let email = input.email.trim();
    if username.is_empty() {
        return Err(CoreError::MissingField("username").into());
    }
    if email.is_empty() {
        return Err(CoreError::MissingField("email").into());
    }
    if input.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns access and refresh
/// tokens and persists the refresh token's hash as the user's single
/// live session (overwriting any prior one).
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthenticated(
                "Invalid username or password".into(),
            ))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthenticated(
            "Invalid username or password".into(),
        )));
    }

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a live refresh token for a rotated pair. A token whose
/// signature verifies but which is not the persisted session value is
/// rejected -- rotation permanently invalidates superseded tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    // Structural decode first, to learn which user's session to compare
    // against. The token is not trusted as a live session yet.
    let claims = validate_token(&input.refresh_token, &state.config.jwt)
        .map_err(|_| AppError::Core(CoreError::InvalidSession))?;

    let session = SessionRepo::find_by_user(&state.pool, claims.sub).await?;
    let stored_hash = session.as_ref().map(|s| s.refresh_token_hash.as_str());

    let user_id = match check_refresh_token(&input.refresh_token, stored_hash, &state.config.jwt) {
        RefreshCheck::Valid { user_id } => user_id,
        rejected => {
            tracing::debug!(reason = ?rejected, "Refresh token rejected");
            return Err(AppError::Core(CoreError::InvalidSession));
        }
    };

    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::InvalidSession))?;

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Clear the caller's session row, making any previously issued refresh
/// token permanently unusable. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::delete_for_user(&state.pool, auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Mint an access + refresh pair and rotate the user's session row.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;

    let access_token = generate_access_token(user.id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let refresh_token = generate_refresh_token(user.id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let expires_at = Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days);
    SessionRepo::upsert(
        &state.pool,
        user.id,
        &hash_refresh_token(&refresh_token),
        expires_at,
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        },
    })
}
