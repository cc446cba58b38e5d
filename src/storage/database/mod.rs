//! Relational storage
//!
//! SeaORM entities, schema migrations, and the query layer. All SQL goes
//! through the `Database` handle; services never touch SeaORM directly.

/// Entity definitions
pub mod entities;
/// Database migrations
pub mod migration;
/// SeaORM query layer
pub mod seaorm_db;

pub use seaorm_db::{Database, DatabaseBackendType, SearchResults, TaskUpdate, WorkspaceMemberInfo};
