//! Account API models

use serde::{Deserialize, Serialize};

use crate::db::models::User;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "first_name")]
    pub first_name: Option<String>,
    #[serde(alias = "last_name")]
    pub last_name: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "country_code")]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: Option<String>,
    #[serde(alias = "new_password")]
    pub new_password: Option<String>,
}

/// Public view of an account; never carries the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country_code: Option<String>,
    pub phone: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            country_code: user.country_code,
            phone: user.phone,
        }
    }
}

/// Signup and login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

/// Forgot-password acknowledgement; `reset_token` only when exposure is enabled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordResponse {
    pub message: String,
    #[serde(rename = "resetToken", skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_signup_accepts_camel_case() {
        let req: SignupRequest = serde_json::from_value(json!({
            "username": "jdoe",
            "password": "secret1",
            "email": "jdoe@example.com",
            "firstName": "Jane",
            "lastName": "Doe",
            "countryCode": "+1"
        }))
        .unwrap();
        assert_eq!(req.first_name.as_deref(), Some("Jane"));
        assert_eq!(req.country_code.as_deref(), Some("+1"));
        assert!(req.phone.is_none());
    }

    #[test]
    fn test_user_response_hides_password() {
        let user = User {
            username: "jdoe".into(),
            password: "$2b$04$hash".into(),
            email: "jdoe@example.com".into(),
            first_name: None,
            last_name: None,
            phone: None,
            country_code: None,
            created_at: "2025-01-01T00:00:00Z".into(),
        };
        let body = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(body.get("password").is_none());
        assert_eq!(body["username"], "jdoe");
    }
}
