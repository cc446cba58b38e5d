//! Search service

use crate::storage::database::{Database, SearchResults};
use crate::utils::error::{ApiError, Result};
use std::sync::Arc;
use uuid::Uuid;

/// Search service
#[derive(Clone)]
pub struct SearchService {
    db: Arc<Database>,
}

impl SearchService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Substring search scoped to the caller's memberships
    ///
    /// `unrestricted` lifts the membership scoping for SYSADMIN callers.
    pub async fn search(
        &self,
        user_id: Uuid,
        query: &str,
        unrestricted: bool,
    ) -> Result<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::validation("Search query cannot be empty"));
        }
        if query.len() > 100 {
            return Err(ApiError::validation(
                "Search query cannot exceed 100 characters",
            ));
        }

        self.db.search(user_id, query, unrestricted).await
    }
}
