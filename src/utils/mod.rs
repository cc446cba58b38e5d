//! Utility modules
//!
//! Shared error handling and validation helpers.

pub mod error;
pub mod validation;

pub use error::{ApiError, Result};
