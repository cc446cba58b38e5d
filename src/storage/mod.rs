//! Storage layer
//!
//! Data persistence: the relational database and the uploaded-file store.

/// Database storage module
pub mod database;
/// File storage module
pub mod files;

use crate::config::{DatabaseConfig, StorageConfig};
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use database::Database;
pub use files::FileStorage;

/// Storage layer orchestrating the persistence backends
#[derive(Debug, Clone)]
pub struct StorageLayer {
    /// Database connection pool
    pub database: Arc<Database>,
    /// File storage backend
    pub files: Arc<FileStorage>,
}

impl StorageLayer {
    /// Create a new storage layer
    pub async fn new(database: &DatabaseConfig, storage: &StorageConfig) -> Result<Self> {
        info!("Initializing storage layer");

        debug!("Connecting to database");
        let database = Arc::new(Database::new(database).await?);

        debug!("Initializing file storage");
        let files = Arc::new(FileStorage::new(storage).await?);

        info!("Storage layer initialized successfully");
        Ok(Self { database, files })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        self.database.migrate().await
    }

    /// Health check for all storage backends
    pub async fn health_check(&self) -> Result<StorageHealthStatus> {
        let mut status = StorageHealthStatus {
            database: false,
            files: false,
            overall: false,
        };

        match self.database.ping().await {
            Ok(()) => status.database = true,
            Err(e) => warn!("Database health check failed: {}", e),
        }

        match self.files.health_check().await {
            Ok(()) => status.files = true,
            Err(e) => warn!("File storage health check failed: {}", e),
        }

        status.overall = status.database && status.files;
        Ok(status)
    }
}

/// Health status of the storage backends
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct StorageHealthStatus {
    pub database: bool,
    pub files: bool,
    pub overall: bool,
}
