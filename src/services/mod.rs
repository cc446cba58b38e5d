//! Services module
//!
//! Business logic for each aggregate. Services check existence and
//! invariants, then delegate to the database ops; handlers never query
//! storage directly.

pub mod bookmark;
pub mod comment;
pub mod media;
pub mod project;
pub mod search;
pub mod tag;
pub mod task;
pub mod user;
pub mod workspace;

pub use bookmark::BookmarkService;
pub use comment::CommentService;
pub use media::MediaService;
pub use project::ProjectService;
pub use search::SearchService;
pub use tag::TagService;
pub use task::TaskService;
pub use user::UserService;
pub use workspace::WorkspaceService;

use crate::storage::{Database, FileStorage};
use std::sync::Arc;

/// All services, wired to shared storage
#[derive(Clone)]
pub struct Services {
    pub workspaces: WorkspaceService,
    pub projects: ProjectService,
    pub tasks: TaskService,
    pub tags: TagService,
    pub comments: CommentService,
    pub bookmarks: BookmarkService,
    pub users: UserService,
    pub media: MediaService,
    pub search: SearchService,
}

impl Services {
    pub fn new(database: Arc<Database>, files: Arc<FileStorage>) -> Self {
        Self {
            workspaces: WorkspaceService::new(Arc::clone(&database)),
            projects: ProjectService::new(Arc::clone(&database)),
            tasks: TaskService::new(Arc::clone(&database)),
            tags: TagService::new(Arc::clone(&database)),
            comments: CommentService::new(Arc::clone(&database)),
            bookmarks: BookmarkService::new(Arc::clone(&database)),
            users: UserService::new(Arc::clone(&database)),
            media: MediaService::new(Arc::clone(&database), files),
            search: SearchService::new(database),
        }
    }
}
