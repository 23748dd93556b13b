//! Server configuration for reporting-server
//!
//! Loads and parses `reporting-server.toml` with listener, database,
//! security, token and CORS settings. Every section is optional; a missing
//! file yields the built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod security;

/// Secret used to sign tokens when nothing else is configured
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

#[derive(Debug, Error)]
pub enum ServerConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Listener and identification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerInfoConfig {
    /// Server name reported by the health endpoints
    pub name: String,
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerInfoConfig {
    fn default() -> Self {
        Self {
            name: "reporting-server".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx connection string
    pub url: String,
    /// Maximum pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://reporting.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

/// Security mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecurityMode {
    /// No authentication on data routes
    #[default]
    Open,
    /// Ingestion routes require the shared secret as a bearer token
    SecretKey,
    /// Data routes require a user access token
    UserLogin,
}

/// Security configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub mode: SecurityMode,
    /// Shared ingestion secret (overridden by `SECRET_KEY`)
    pub secret_key: Option<String>,
}

/// Token issuing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for HS256 tokens (overridden by `JWT_SECRET`)
    pub jwt_secret: String,
    /// Lifetime of access tokens
    pub token_ttl_minutes: i64,
    /// Lifetime of password-reset tokens
    pub reset_token_ttl_minutes: i64,
    /// Return the reset token in the forgot-password response
    pub expose_reset_token: bool,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_minutes: 30,
            reset_token_ttl_minutes: 15,
            expose_reset_token: false,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any origin
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "https://reporting-frontend-bhrm.onrender.com".to_string(),
                "http://localhost:3000".to_string(),
                "http://localhost:3001".to_string(),
            ],
        }
    }
}

/// A deployed system checked by `reporting-admin check-deployed`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentTarget {
    pub name: String,
    pub base_url: String,
    /// Paths appended to `base_url`
    #[serde(default)]
    pub endpoints: Vec<String>,
}

/// Deployment check configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentConfig {
    pub targets: Vec<DeploymentTarget>,
}

/// Complete server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerInfoConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
    pub deployment: DeploymentConfig,
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ServerConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|source| ServerConfigError::ReadError {
                path: path.as_ref().to_path_buf(),
                source,
            })?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, ServerConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Find the configuration file
    ///
    /// Searches, in order:
    /// 1. CONFIG_PATH environment variable
    /// 2. ./config/reporting-server.toml
    /// 3. ../config/reporting-server.toml (for development)
    /// 4. ./reporting-server.toml
    pub fn locate() -> Option<PathBuf> {
        if let Ok(config_path) = std::env::var("CONFIG_PATH") {
            return Some(PathBuf::from(config_path));
        }

        [
            PathBuf::from("config/reporting-server.toml"),
            PathBuf::from("../config/reporting-server.toml"),
            PathBuf::from("./reporting-server.toml"),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Load configuration from the default location and apply environment
    /// overrides
    pub fn load() -> Result<Self, ServerConfigError> {
        let mut config = match Self::locate() {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading server configuration");
                Self::from_file(&path)?
            }
            None => {
                tracing::warn!("No reporting-server.toml found, using built-in defaults");
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `HOST`, `PORT`, `DATABASE_URL`, `JWT_SECRET` and `SECRET_KEY`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ServerConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ServerConfigError::InvalidConfig(format!("PORT is not a port number: {}", port)))?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(key) = lookup("SECRET_KEY") {
            self.security.secret_key = Some(key);
        }
        Ok(())
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> Result<(), ServerConfigError> {
        if self.database.max_connections == 0 {
            return Err(ServerConfigError::InvalidConfig(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerConfigError::InvalidConfig("auth.jwt_secret is empty".to_string()));
        }
        if self.auth.token_ttl_minutes <= 0 || self.auth.reset_token_ttl_minutes <= 0 {
            return Err(ServerConfigError::InvalidConfig(
                "token lifetimes must be positive".to_string(),
            ));
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ServerConfigError::InvalidConfig(
                "auth.bcrypt_cost must be between 4 and 31".to_string(),
            ));
        }
        if self.security.mode == SecurityMode::SecretKey
            && self.security.secret_key.as_deref().map_or(true, str::is_empty)
        {
            return Err(ServerConfigError::InvalidConfig(
                "security.mode = \"secret-key\" needs security.secret_key or SECRET_KEY".to_string(),
            ));
        }
        Ok(())
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
