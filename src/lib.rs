//! # TaskHub
//!
//! Task and project collaboration backend. Workspaces own projects, projects
//! own tasks and tags, tasks carry comments, bookmarks and media. Every
//! request against those resources is authorized through workspace
//! membership roles (READER < COLLABORATOR < ADMIN), resolved by walking the
//! resource's ownership chain up to its workspace.
//!
//! ## Running the server
//!
//! ```rust,no_run
//! use taskhub::config::Config;
//! use taskhub::server::HttpServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load().await?;
//!     let server = HttpServer::new(&config).await?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use server::HttpServer;
pub use utils::error::{ApiError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
