//! Security configuration and middleware
//!
//! Handles the security modes: open, secret-key and user-login. The
//! middleware is layered over the data, ingestion and admin write routes;
//! auth, health, docs and admin info routes are mounted outside it.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::api::error::ApiError;
use crate::auth::{bearer_token, AuthError, TokenManager};
use crate::config::{SecurityConfig, SecurityMode};

/// Security middleware state
#[derive(Clone)]
pub struct SecurityState {
    config: Arc<SecurityConfig>,
    tokens: TokenManager,
}

impl SecurityState {
    pub fn new(config: SecurityConfig, tokens: TokenManager) -> Self {
        Self {
            config: Arc::new(config),
            tokens,
        }
    }

    pub fn mode(&self) -> SecurityMode {
        self.config.mode
    }

    pub fn secret_key(&self) -> Option<&str> {
        self.config.secret_key.as_deref().filter(|key| !key.is_empty())
    }
}

/// Ingestion routes: the unified results endpoints and every `/bulk` upload
pub fn is_ingestion_path(path: &str) -> bool {
    path.starts_with("/api/v1/results") || path.trim_end_matches('/').ends_with("/bulk")
}

/// Admin routes that seed, clear or drop the database
pub fn is_admin_write_path(path: &str) -> bool {
    matches!(
        path.trim_end_matches('/'),
        "/admin/generate-data" | "/admin/reset-db" | "/admin/delete-db"
    )
}

/// Paths that need the shared secret in secret-key mode
pub fn requires_secret_key(path: &str) -> bool {
    is_ingestion_path(path) || is_admin_write_path(path)
}

fn keys_match(given: &str, expected: &str) -> bool {
    given.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Security middleware for Axum
pub async fn security_middleware(
    State(state): State<SecurityState>,
    request: Request,
    next: Next,
) -> Response {
    match state.mode() {
        SecurityMode::Open => next.run(request).await,
        SecurityMode::SecretKey => {
            if !requires_secret_key(request.uri().path()) {
                return next.run(request).await;
            }
            let authorized = match (bearer_token(request.headers()), state.secret_key()) {
                (Some(key), Some(expected)) => keys_match(key, expected),
                _ => false,
            };
            if authorized {
                next.run(request).await
            } else {
                warn!(path = %request.uri().path(), "Unauthorized request - missing or invalid secret key");
                ApiError::Unauthorized("Invalid or missing secret key".to_string()).into_response()
            }
        }
        SecurityMode::UserLogin => {
            let verified = bearer_token(request.headers())
                .ok_or(AuthError::MissingToken)
                .and_then(|token| state.tokens.verify_access_token(token));
            match verified {
                Ok(_) => next.run(request).await,
                Err(err) => {
                    warn!(path = %request.uri().path(), error = %err, "Unauthorized request");
                    ApiError::from(err).into_response()
                }
            }
        }
    }
}
