/// Bookmark entity module
pub mod bookmark;
/// Comment entity module
pub mod comment;
/// Media entity module
pub mod media;
/// Password reset token entity module
pub mod password_reset_token;
/// Project entity module
pub mod project;
/// Tag entity module
pub mod tag;
/// Task entity module
pub mod task;
/// Task tag assignment entity module
pub mod task_tag;
/// User entity module
pub mod user;
/// Workspace entity module
pub mod workspace;
/// Workspace member entity module
pub mod workspace_member;

pub use bookmark::Entity as Bookmark;
pub use comment::Entity as Comment;
pub use media::Entity as Media;
pub use password_reset_token::Entity as PasswordResetToken;
pub use project::Entity as Project;
pub use tag::Entity as Tag;
pub use task::Entity as Task;
pub use task_tag::Entity as TaskTag;
pub use user::Entity as User;
pub use workspace::Entity as Workspace;
pub use workspace_member::Entity as WorkspaceMember;
