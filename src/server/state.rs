//! Application state shared across HTTP handlers

use crate::auth::{AuthSystem, MembershipResolver};
use crate::config::Config;
use crate::services::Services;
use crate::storage::StorageLayer;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are cheap to clone; shared resources are wrapped in Arc.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration (shared read-only)
    pub config: Arc<Config>,
    /// Authentication system
    pub auth: Arc<AuthSystem>,
    /// Authorization resolver
    pub resolver: MembershipResolver,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
    /// Business services
    pub services: Services,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, storage: StorageLayer) -> Self {
        let storage = Arc::new(storage);
        let auth = Arc::new(AuthSystem::new(
            &config.auth,
            Arc::clone(&storage.database),
        ));
        let resolver = MembershipResolver::new(
            Arc::clone(&storage.database) as _,
            Arc::clone(&storage.database) as _,
        );
        let services = Services::new(
            Arc::clone(&storage.database),
            Arc::clone(&storage.files),
        );

        Self {
            config: Arc::new(config),
            auth,
            resolver,
            storage,
            services,
        }
    }
}
