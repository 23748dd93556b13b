//! Request extractor for authenticated users

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::{bearer_token, AuthError};
use crate::api::error::ApiError;
use crate::api::routes::AppState;
use crate::db::models::User;
use crate::db::repositories::UserRepository;

/// The account behind a valid access token
///
/// Rejects with 401 for a missing, expired or invalid token and 404 when the
/// token's subject no longer exists.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthError::MissingToken)?;
        let claims = state.auth.tokens().verify_access_token(token)?;

        UserRepository::get_by_email(state.db.pool(), &claims.sub)
            .await
            .map_err(|e| ApiError::DatabaseError(e.into()))?
            .map(AuthUser)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }
}
