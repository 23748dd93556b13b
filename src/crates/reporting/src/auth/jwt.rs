//! JWT issuing and verification

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::config::AuthConfig;

/// `purpose` claim carried by password-reset tokens
pub const PASSWORD_RESET_PURPOSE: &str = "password_reset";

/// Token claims; `sub` is the account email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

/// HS256 token manager
#[derive(Clone)]
pub struct TokenManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    reset_ttl: Duration,
}

impl TokenManager {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: Duration::minutes(config.token_ttl_minutes),
            reset_ttl: Duration::minutes(config.reset_token_ttl_minutes),
        }
    }

    fn issue(&self, email: &str, purpose: Option<&str>, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            purpose: purpose.map(str::to_string),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Encoding(e.to_string()))
    }

    /// Issue an access token for an account email
    pub fn issue_access_token(&self, email: &str) -> Result<String, AuthError> {
        self.issue(email, None, self.access_ttl)
    }

    /// Issue a password-reset token for an account email
    pub fn issue_reset_token(&self, email: &str) -> Result<String, AuthError> {
        self.issue(email, Some(PASSWORD_RESET_PURPOSE), self.reset_ttl)
    }

    fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken,
            })
    }

    /// Verify an access token; reset tokens are rejected
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.decode(token)?;
        if claims.purpose.is_some() {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }

    /// Verify a password-reset token
    pub fn verify_reset_token(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.decode(token)?;
        if claims.purpose.as_deref() != Some(PASSWORD_RESET_PURPOSE) {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(token_ttl_minutes: i64) -> TokenManager {
        TokenManager::new(&AuthConfig {
            jwt_secret: "unit-test-secret".to_string(),
            token_ttl_minutes,
            ..AuthConfig::default()
        })
    }

    #[test]
    fn test_access_token_roundtrip() {
        let tokens = manager(30);
        let token = tokens.issue_access_token("qa@transit.example").unwrap();

        let claims = tokens.verify_access_token(&token).unwrap();
        assert_eq!(claims.sub, "qa@transit.example");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert!(claims.purpose.is_none());
    }

    #[test]
    fn test_expired_token() {
        let tokens = manager(-5);
        let token = tokens.issue_access_token("qa@transit.example").unwrap();

        assert!(matches!(tokens.verify_access_token(&token), Err(AuthError::Expired)));
    }

    #[test]
    fn test_foreign_secret_is_invalid() {
        let token = manager(30).issue_access_token("qa@transit.example").unwrap();
        let other = TokenManager::new(&AuthConfig {
            jwt_secret: "another-secret".to_string(),
            ..AuthConfig::default()
        });

        assert!(matches!(other.verify_access_token(&token), Err(AuthError::InvalidToken)));
        assert!(matches!(other.verify_access_token("not-a-jwt"), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_reset_and_access_tokens_are_not_interchangeable() {
        let tokens = manager(30);
        let reset = tokens.issue_reset_token("qa@transit.example").unwrap();
        let access = tokens.issue_access_token("qa@transit.example").unwrap();

        assert_eq!(
            tokens.verify_reset_token(&reset).unwrap().purpose.as_deref(),
            Some(PASSWORD_RESET_PURPOSE)
        );
        assert!(matches!(tokens.verify_access_token(&reset), Err(AuthError::InvalidToken)));
        assert!(matches!(tokens.verify_reset_token(&access), Err(AuthError::InvalidToken)));
    }
}
