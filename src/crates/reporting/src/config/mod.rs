//! Configuration module for the reporting backend
//!
//! Server configuration is read from `reporting-server.toml` and can be
//! overridden from the environment.

pub mod server;

pub use server::{
    AuthConfig, CorsConfig, DatabaseConfig, DeploymentConfig, DeploymentTarget, SecurityConfig,
    SecurityMode, ServerConfig, ServerConfigError, ServerInfoConfig, DEFAULT_JWT_SECRET,
};
pub use server::security::{security_middleware, SecurityState};
