//! Authentication
//!
//! HS256 access and password-reset tokens, bcrypt password hashing and the
//! [`AuthUser`] extractor that resolves a bearer token to a stored account.

pub mod extractor;
pub mod jwt;
pub mod password;

use axum::http::{header::AUTHORIZATION, HeaderMap};
use thiserror::Error;

use crate::config::AuthConfig;

pub use extractor::AuthUser;
pub use jwt::{Claims, TokenManager, PASSWORD_RESET_PURPOSE};

/// Authentication failures
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No valid token provided")]
    MissingToken,

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token encoding failed: {0}")]
    Encoding(String),

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Password task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Token issuing plus password hashing, shared through the application state
#[derive(Clone)]
pub struct AuthService {
    tokens: TokenManager,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            tokens: TokenManager::new(config),
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Hash on the blocking pool; bcrypt holds the thread for the whole cost
    pub async fn hash_password(&self, plain: &str) -> Result<String, AuthError> {
        let plain = plain.to_string();
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || password::hash_password(&plain, cost)).await?
    }

    pub async fn verify_password(&self, plain: &str, hashed: &str) -> Result<bool, AuthError> {
        let plain = plain.to_string();
        let hashed = hashed.to_string();
        Ok(tokio::task::spawn_blocking(move || password::verify_password(&plain, &hashed)).await?)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[tokio::test]
    async fn test_service_hashes_off_the_runtime() {
        let config = AuthConfig {
            bcrypt_cost: 4,
            ..AuthConfig::default()
        };
        let auth = AuthService::new(&config);

        let hashed = auth.hash_password("ride-the-rail").await.unwrap();
        assert!(auth.verify_password("ride-the-rail", &hashed).await.unwrap());
        assert!(!auth.verify_password("ride-the-bus", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_hashes_complete() {
        let config = AuthConfig {
            bcrypt_cost: 4,
            ..AuthConfig::default()
        };
        let auth = AuthService::new(&config);

        let (first, second) = tokio::join!(auth.hash_password("first"), auth.hash_password("second"));
        let (first, second) = (first.unwrap(), second.unwrap());
        assert_ne!(first, second);
        assert!(auth.verify_password("first", &first).await.unwrap());
        assert!(auth.verify_password("second", &second).await.unwrap());
    }

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(AuthError::MissingToken.to_string(), "No valid token provided");
        assert_eq!(AuthError::Expired.to_string(), "Token has expired");
        assert_eq!(AuthError::InvalidToken.to_string(), "Invalid token");
    }
}
