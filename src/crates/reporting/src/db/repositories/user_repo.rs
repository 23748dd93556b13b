//! User repository for database operations

use crate::db::connection::DatabasePool;
use crate::db::models::User;
use chrono::Utc;

/// User repository for account storage
pub struct UserRepository;

impl UserRepository {
    /// Insert a user; `password_hash` must already be hashed
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &DatabasePool,
        username: &str,
        password_hash: &str,
        email: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
        phone: Option<&str>,
        country_code: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password, email, first_name, last_name, phone, country_code, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .bind(country_code)
        .bind(&now)
        .fetch_one(pool)
        .await
    }

    /// Get a user by username
    pub async fn get_by_username(pool: &DatabasePool, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Get a user by email
    pub async fn get_by_email(pool: &DatabasePool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Replace a user's password hash, returning whether the user exists
    pub async fn update_password(pool: &DatabasePool, username: &str, password_hash: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password = ? WHERE username = ?")
            .bind(password_hash)
            .bind(username)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count total users
    pub async fn count(pool: &DatabasePool) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        Ok(result.0)
    }
}
