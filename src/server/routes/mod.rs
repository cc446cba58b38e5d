//! HTTP route modules
//!
//! Route handlers organized by aggregate. Handlers return the typed error
//! directly; status mapping lives on the error type.

pub mod auth;
pub mod bookmarks;
pub mod comments;
pub mod health;
pub mod media;
pub mod members;
pub mod projects;
pub mod search;
pub mod tags;
pub mod tasks;
pub mod users;
pub mod workspaces;

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success("test data");
        assert!(response.success);
        assert_eq!(response.data, Some("test data"));
    }
}
