//! HTTP middleware
//!
//! Request authentication and the role guards layered on top of it.

pub mod auth;
pub mod guards;

pub use auth::{AuthMiddleware, AuthenticatedUser, authenticated_user};
pub use guards::{RequireMemberRole, RequireSystemRole};
