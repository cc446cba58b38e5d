// Module declarations
mod types;
mod connection;
mod user_ops;
mod token_ops;
mod workspace_ops;
mod member_ops;
mod project_ops;
mod task_ops;
mod tag_ops;
mod comment_ops;
mod bookmark_ops;
mod media_ops;
mod search_ops;
mod resolver_ops;

// Re-export public types
pub use member_ops::WorkspaceMemberInfo;
pub use search_ops::SearchResults;
pub use task_ops::TaskUpdate;
pub use types::{Database, DatabaseBackendType};
