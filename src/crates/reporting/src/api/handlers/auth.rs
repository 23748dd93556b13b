//! Account endpoint handlers: signup, login, current user and password reset

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::{info, warn};

use crate::api::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    middleware::validate_min_length,
    models::{
        AuthResponse, ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest, ResetPasswordRequest, SignupRequest,
        UserResponse,
    },
    response,
    routes::AppState,
};
use crate::auth::AuthUser;
use crate::db::repositories::UserRepository;

const MIN_PASSWORD_LENGTH: usize = 6;

fn required<'a>(value: &'a Option<String>, field: &str) -> ApiResult<&'a str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::ValidationError(format!("Missing required field: {}", field))),
    }
}

/// Register an account and return an access token
///
/// POST /api/signup
pub async fn signup(State(state): State<AppState>, ApiJson(req): ApiJson<SignupRequest>) -> ApiResult<impl IntoResponse> {
    let username = required(&req.username, "username")?;
    let password = required(&req.password, "password")?;
    let email = required(&req.email, "email")?;
    let first_name = required(&req.first_name, "firstName")?;
    let last_name = required(&req.last_name, "lastName")?;

    let pool = state.db.pool();
    if UserRepository::get_by_username(pool, username).await?.is_some() {
        return Err(ApiError::Conflict("Username already exists".to_string()));
    }
    if UserRepository::get_by_email(pool, email).await?.is_some() {
        return Err(ApiError::Conflict("Email already exists".to_string()));
    }

    let password_hash = state.auth.hash_password(password).await?;
    let user = UserRepository::create(
        pool,
        username,
        &password_hash,
        email,
        Some(first_name),
        Some(last_name),
        req.phone.as_deref(),
        req.country_code.as_deref(),
    )
    .await?;

    let token = state.auth.tokens().issue_access_token(&user.email)?;
    info!(username = %user.username, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            token,
            user: user.into(),
        }),
    ))
}

/// Exchange credentials for an access token
///
/// POST /api/login
pub async fn login(State(state): State<AppState>, ApiJson(req): ApiJson<LoginRequest>) -> ApiResult<impl IntoResponse> {
    let (Some(username), Some(password)) = (req.username.as_deref(), req.password.as_deref()) else {
        return Err(ApiError::ValidationError("Username and password are required".to_string()));
    };
    if username.is_empty() || password.is_empty() {
        return Err(ApiError::ValidationError("Username and password are required".to_string()));
    }

    let invalid = || ApiError::Unauthorized("Invalid credentials".to_string());
    let user = UserRepository::get_by_username(state.db.pool(), username)
        .await?
        .ok_or_else(invalid)?;
    if !state.auth.verify_password(password, &user.password).await? {
        warn!(username = %username, "Login rejected");
        return Err(invalid());
    }

    let token = state.auth.tokens().issue_access_token(&user.email)?;
    info!(username = %user.username, "User logged in");

    Ok(response::ok(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: user.into(),
    }))
}

/// GET /api/me
pub async fn me(AuthUser(user): AuthUser) -> impl IntoResponse {
    response::ok(json!({ "user": UserResponse::from(user) }))
}

/// Issue a password-reset token for a known email
///
/// POST /api/forgot-password
///
/// The response is the same whether or not the email is registered.
pub async fn forgot_password(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ForgotPasswordRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = required(&req.email, "email")?;

    let mut reset_token = None;
    if let Some(user) = UserRepository::get_by_email(state.db.pool(), email).await? {
        let token = state.auth.tokens().issue_reset_token(&user.email)?;
        info!(username = %user.username, "Password reset token issued");
        if state.config.auth.expose_reset_token {
            reset_token = Some(token);
        }
    }

    Ok(response::ok(ForgotPasswordResponse {
        message: "If the email is registered, a password reset link has been sent".to_string(),
        reset_token,
    }))
}

/// Set a new password using a reset token
///
/// POST /api/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ResetPasswordRequest>,
) -> ApiResult<impl IntoResponse> {
    let token = required(&req.token, "token")?;
    let new_password = required(&req.new_password, "newPassword")?;
    validate_min_length(new_password, "newPassword", MIN_PASSWORD_LENGTH)?;

    let claims = state.auth.tokens().verify_reset_token(token)?;
    let pool = state.db.pool();
    let user = UserRepository::get_by_email(pool, &claims.sub)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let password_hash = state.auth.hash_password(new_password).await?;
    UserRepository::update_password(pool, &user.username, &password_hash).await?;

    info!(username = %user.username, "Password reset");
    Ok(response::message("Password has been reset successfully"))
}
