// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication handlers: registration, login, logout, current user, and
//! password change.

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use warden_core::{NewUser, Role, User};

use crate::auth::{clear_session_cookie, session_cookie};
use crate::error::{ApiError, ApiResult, ValidationErrors};
use crate::extractors::{Auth, ValidatedJson};
use crate::response::{StatusResponse, TokenResponse, UserResponse};
use crate::state::AppState;

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 8;

// =============================================================================
// Signup
// =============================================================================

/// Signup request body.
///
/// Every field is optional at the deserialization layer so that missing
/// fields surface as one structured validation report instead of a serde
/// rejection naming only the first.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupRequest {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
    /// Password confirmation; compared and discarded, never persisted.
    pub password_confirm: Option<String>,
    /// Requested role. Defaults to the least-privileged role.
    pub role: Option<Role>,
}

impl SignupRequest {
    /// Validates the payload, collecting every field error.
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if is_blank(&self.first_name) {
            errors.add("firstName", "First Name field is required!");
        }
        if is_blank(&self.last_name) {
            errors.add("lastName", "Last Name field is required!");
        }

        match self.email.as_deref().map(str::trim) {
            None | Some("") => errors.add("email", "Email field is required"),
            Some(email) if !is_valid_email(email) => {
                errors.add("email", "Please provide a valid email")
            }
            Some(_) => {}
        }

        match self.password.as_deref() {
            None | Some("") => errors.add("password", "Password field is required"),
            Some(password) if password.len() < MIN_PASSWORD_LEN => {
                errors.add("password", "Password must be at least 8 characters")
            }
            Some(_) => {}
        }

        match self.password_confirm.as_deref() {
            None | Some("") => errors.add("passwordConfirm", "Please confirm your password"),
            Some(confirm) if self.password.as_deref() != Some(confirm) => {
                errors.add("passwordConfirm", "Passwords are not the same!")
            }
            Some(_) => {}
        }

        errors
    }
}

/// POST /api/v1/users/signup
///
/// Registers a new identity and immediately issues a credential token.
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<Response> {
    request.validate().into_result()?;

    let new_user = NewUser {
        // Checked non-empty by validate() above.
        first_name: request.first_name.unwrap_or_default(),
        last_name: request.last_name.unwrap_or_default(),
        email: request.email.unwrap_or_default(),
        password: request.password.unwrap_or_default(),
        role: request.role.unwrap_or_default(),
    };

    let user = state.store().create(new_user).await?;

    tracing::info!(user_id = %user.id, email = %user.email, "User registered");

    send_token(&state, &user, StatusCode::CREATED, true)
}

// =============================================================================
// Login
// =============================================================================

/// Login request body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Email address.
    pub email: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

/// POST /api/v1/users/login
///
/// Authenticates an identity and issues a credential token.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Response> {
    // 1) Both fields must be present; this is a malformed request, not a
    //    failed authentication.
    let (email, password) = match (request.email.as_deref(), request.password.as_deref()) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(ApiError::bad_request("Please provide email and password!")),
    };

    // 2) One generic failure for unknown email and wrong password alike, so
    //    responses cannot be used to enumerate accounts.
    let user = state
        .store()
        .find_by_email(email)
        .await?
        .filter(|user| warden_core::verify_password(password, &user.password_hash))
        .ok_or_else(|| ApiError::unauthorized("Incorrect email or password"))?;

    tracing::info!(user_id = %user.id, "User logged in");

    // 3) Everything checks out: send the token.
    send_token(&state, &user, StatusCode::OK, false)
}

// =============================================================================
// Logout
// =============================================================================

/// GET /api/v1/users/logout
///
/// Overwrites the session cookie with a sentinel that expires in seconds.
/// Stateless: nothing is revoked server-side.
pub async fn logout(State(state): State<AppState>, Auth(ctx): Auth) -> impl IntoResponse {
    tracing::info!(user_id = %ctx.user_id(), "User logged out");

    let cookie = clear_session_cookie(state.config.environment.is_production());
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(StatusResponse::success()),
    )
}

// =============================================================================
// Current User
// =============================================================================

/// GET /api/v1/users/me
///
/// Returns the authenticated identity's public representation.
pub async fn current_user(Auth(ctx): Auth) -> Json<UserResponse> {
    Json(UserResponse::new(&ctx.user))
}

// =============================================================================
// Change Password
// =============================================================================

/// Change password request body.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// The current password, verified before anything changes.
    pub current_password: Option<String>,
    /// The replacement password.
    pub new_password: Option<String>,
}

/// POST /api/v1/users/change-password
///
/// Changes the authenticated identity's password and issues a fresh token.
/// Every token issued before the change becomes stale at the gate.
pub async fn change_password(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Response> {
    let mut errors = ValidationErrors::new();
    if is_blank(&request.current_password) {
        errors.add("currentPassword", "Current password field is required");
    }
    match request.new_password.as_deref() {
        None | Some("") => errors.add("newPassword", "New password field is required"),
        Some(password) if password.len() < MIN_PASSWORD_LEN => {
            errors.add("newPassword", "Password must be at least 8 characters")
        }
        Some(_) => {}
    }
    errors.into_result()?;

    let current = request.current_password.unwrap_or_default();
    if !warden_core::verify_password(&current, &ctx.user.password_hash) {
        return Err(ApiError::unauthorized("Your current password is wrong."));
    }

    let new_password = request.new_password.unwrap_or_default();
    let user = state
        .store()
        .update_password(ctx.user_id(), &new_password)
        .await?;

    tracing::info!(user_id = %user.id, "Password changed");

    // The fresh token postdates the change stamp, so the caller stays
    // logged in while every older token dies.
    send_token(&state, &user, StatusCode::OK, false)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Issues a token for `user` and shapes the transport response: JSON body
/// plus the session cookie.
fn send_token(
    state: &AppState,
    user: &User,
    status: StatusCode,
    include_user: bool,
) -> ApiResult<Response> {
    let token = state.jwt().issue_for(user)?;

    let cookie = session_cookie(
        &token,
        state.jwt().ttl_secs(),
        state.config.environment.is_production(),
    );

    let body = if include_user {
        TokenResponse::new(token).with_user(user)
    } else {
        TokenResponse::new(token)
    };

    Ok((status, AppendHeaders([(SET_COOKIE, cookie)]), Json(body)).into_response())
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |s| s.trim().is_empty())
}

/// Minimal structural email check: `local@domain.tld`.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

// =============================================================================
// Tests
// =============================================================================
