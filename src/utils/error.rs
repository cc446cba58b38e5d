//! Error handling for the backend
//!
//! This module defines all error types used throughout the service.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the backend
pub type Result<T> = std::result::Result<T, ApiError>;

/// Main error type for the backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// No principal attached to the request
    #[error("User not authenticated")]
    Unauthenticated,

    /// Authentication failures (bad credentials, bad token)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Depth tag outside the recognized resolution depths
    #[error("Invalid depth provided")]
    InvalidDepth,

    /// Workspace lookup failed
    #[error("Workspace not found")]
    WorkspaceNotFound,

    /// Project lookup failed
    #[error("Project not found")]
    ProjectNotFound,

    /// Task lookup failed
    #[error("Task not found")]
    TaskNotFound,

    /// Tag lookup failed
    #[error("Tag not found")]
    TagNotFound,

    /// Comment lookup failed
    #[error("Comment not found")]
    CommentNotFound,

    /// Bookmark lookup failed
    #[error("Bookmark not found")]
    BookmarkNotFound,

    /// User lookup failed
    #[error("User not found")]
    UserNotFound,

    /// Principal has no membership on the resolved workspace
    #[error("Member not found")]
    MemberNotFound,

    /// Media lookup failed
    #[error("Media not found")]
    MediaNotFound,

    /// Stored member role is not one of the recognized roles
    #[error("Role invalid or not provided")]
    InvalidMemberRole,

    /// System role is not one of the recognized roles
    #[error("Role invalid or not provided")]
    InvalidSystemRole,

    /// Membership role rank is below the required rank
    #[error("User does not have sufficient privileges to perform this action")]
    InsufficientPrivileges,

    /// Workspace title already taken
    #[error("Workspace already exists")]
    WorkspaceAlreadyExists,

    /// Username or email already registered
    #[error("User already exists")]
    UserAlreadyExists,

    /// User is already a member of the workspace
    #[error("User already invited to this workspace")]
    UserAlreadyInvited,

    /// Bookmark for this (user, task) pair already exists
    #[error("Bookmark already exists")]
    BookmarkAlreadyExists,

    /// Tag is already assigned to the task
    #[error("Tag already assigned to this task")]
    TagAlreadyAssigned,

    /// Members cannot change their own role
    #[error("Members cannot modify their own role")]
    MemberSelfModified,

    /// Members cannot remove themselves from a workspace
    #[error("Members cannot remove themselves from a workspace")]
    MemberSelfRemoved,

    /// Request body or parameter validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File storage errors
    #[error("File storage error: {0}")]
    FileStorage(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            ApiError::Unauthenticated => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                self.to_string(),
            ),
            ApiError::Auth(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "AUTH_ERROR",
                self.to_string(),
            ),
            ApiError::InvalidDepth => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "INVALID_DEPTH",
                self.to_string(),
            ),
            ApiError::WorkspaceNotFound => (
                actix_web::http::StatusCode::NOT_FOUND,
                "WORKSPACE_NOT_FOUND",
                self.to_string(),
            ),
            ApiError::ProjectNotFound => (
                actix_web::http::StatusCode::NOT_FOUND,
                "PROJECT_NOT_FOUND",
                self.to_string(),
            ),
            ApiError::TaskNotFound => (
                actix_web::http::StatusCode::NOT_FOUND,
                "TASK_NOT_FOUND",
                self.to_string(),
            ),
            ApiError::TagNotFound => (
                actix_web::http::StatusCode::NOT_FOUND,
                "TAG_NOT_FOUND",
                self.to_string(),
            ),
            ApiError::CommentNotFound => (
                actix_web::http::StatusCode::NOT_FOUND,
                "COMMENT_NOT_FOUND",
                self.to_string(),
            ),
            ApiError::BookmarkNotFound => (
                actix_web::http::StatusCode::NOT_FOUND,
                "BOOKMARK_NOT_FOUND",
                self.to_string(),
            ),
            ApiError::UserNotFound => (
                actix_web::http::StatusCode::NOT_FOUND,
                "USER_NOT_FOUND",
                self.to_string(),
            ),
            ApiError::MemberNotFound => (
                actix_web::http::StatusCode::NOT_FOUND,
                "MEMBER_NOT_FOUND",
                self.to_string(),
            ),
            ApiError::MediaNotFound => (
                actix_web::http::StatusCode::NOT_FOUND,
                "MEDIA_NOT_FOUND",
                self.to_string(),
            ),
            ApiError::InvalidMemberRole => (
                actix_web::http::StatusCode::FORBIDDEN,
                "INVALID_MEMBER_ROLE",
                self.to_string(),
            ),
            ApiError::InvalidSystemRole => (
                actix_web::http::StatusCode::FORBIDDEN,
                "INVALID_SYSTEM_ROLE",
                self.to_string(),
            ),
            ApiError::InsufficientPrivileges => (
                actix_web::http::StatusCode::FORBIDDEN,
                "INSUFFICIENT_PRIVILEGES",
                self.to_string(),
            ),
            ApiError::WorkspaceAlreadyExists => (
                actix_web::http::StatusCode::CONFLICT,
                "WORKSPACE_ALREADY_EXISTS",
                self.to_string(),
            ),
            ApiError::UserAlreadyExists => (
                actix_web::http::StatusCode::CONFLICT,
                "USER_ALREADY_EXISTS",
                self.to_string(),
            ),
            ApiError::UserAlreadyInvited => (
                actix_web::http::StatusCode::CONFLICT,
                "USER_ALREADY_INVITED",
                self.to_string(),
            ),
            ApiError::BookmarkAlreadyExists => (
                actix_web::http::StatusCode::CONFLICT,
                "BOOKMARK_ALREADY_EXISTS",
                self.to_string(),
            ),
            ApiError::TagAlreadyAssigned => (
                actix_web::http::StatusCode::CONFLICT,
                "TAG_ALREADY_ASSIGNED",
                self.to_string(),
            ),
            ApiError::MemberSelfModified => (
                actix_web::http::StatusCode::CONFLICT,
                "MEMBER_SELF_MODIFIED",
                self.to_string(),
            ),
            ApiError::MemberSelfRemoved => (
                actix_web::http::StatusCode::CONFLICT,
                "MEMBER_SELF_REMOVED",
                self.to_string(),
            ),
            ApiError::Validation(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
            ),
            ApiError::Database(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Database operation failed".to_string(),
            ),
            ApiError::Jwt(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid or expired token".to_string(),
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}

/// Helper functions for creating specific errors
impl ApiError {
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn file_storage<S: Into<String>>(message: S) -> Self {
        Self::FileStorage(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Unauthenticated.error_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::InvalidDepth.error_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ProjectNotFound.error_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::MemberNotFound.error_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::InvalidMemberRole.error_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::InsufficientPrivileges.error_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::BookmarkAlreadyExists.error_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal("boom".into()).error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
