//! Configuration management
//!
//! This module handles loading and validation of service configuration,
//! either from a YAML file or from environment variables.

use crate::utils::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// File storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Number of worker threads (0 = one per core)
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: 0,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (postgres:// or sqlite://)
    pub url: String,
    /// Maximum pool connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connect timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_connection_timeout() -> u64 {
    10
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/taskhub.db?mode=rwc".to_string(),
            max_connections: default_max_connections(),
            connection_timeout: default_connection_timeout(),
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for JWT signing
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: u64,
}

fn default_jwt_expiration() -> u64 {
    3600
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_expiration: default_jwt_expiration(),
        }
    }
}

/// File storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for uploaded files
    pub upload_dir: String,
    /// Maximum upload size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: "uploads".to_string(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ApiError::config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ApiError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Config::default();

        if let Ok(host) = std::env::var("SERVER_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| ApiError::config("SERVER_PORT must be a number"))?;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Ok(expiration) = std::env::var("JWT_EXPIRATION") {
            config.auth.jwt_expiration = expiration
                .parse()
                .map_err(|_| ApiError::config("JWT_EXPIRATION must be a number"))?;
        }
        if let Ok(dir) = std::env::var("UPLOAD_DIR") {
            config.storage.upload_dir = dir;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, preferring a config file when one exists
    pub async fn load() -> Result<Self> {
        let path =
            std::env::var("TASKHUB_CONFIG").unwrap_or_else(|_| "config/taskhub.yaml".to_string());

        if Path::new(&path).exists() {
            Self::from_file(&path).await
        } else {
            Self::from_env()
        }
    }

    /// Validate the loaded configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ApiError::config("Server port must not be 0"));
        }

        if self.database.url.trim().is_empty() {
            return Err(ApiError::config("Database URL must be set"));
        }

        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ApiError::config("JWT secret must be set"));
        }

        if self.auth.jwt_secret == "changeme" || self.auth.jwt_secret.len() < 16 {
            return Err(ApiError::config(
                "JWT secret must be at least 16 characters and not a placeholder",
            ));
        }

        if self.storage.upload_dir.trim().is_empty() {
            return Err(ApiError::config("Upload directory must be set"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            auth: AuthConfig {
                jwt_secret: "a-long-enough-test-secret".to_string(),
                jwt_expiration: 3600,
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_default_config_fails_validation_without_secret() {
        assert!(Config::default().validate().is_err());
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_placeholder_secret_rejected() {
        let mut config = valid_config();
        config.auth.jwt_secret = "changeme".to_string();
        assert!(config.validate().is_err());

        config.auth.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
server:
  host: 127.0.0.1
  port: 9090
database:
  url: sqlite://test.db
auth:
  jwt_secret: a-long-enough-test-secret
storage:
  upload_dir: /tmp/uploads
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.max_connections, 10);
        assert!(config.validate().is_ok());
    }
}
