// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # BookCommunity API Client
//!
//! Async client for the BookCommunity REST API. Wraps a handful of endpoints
//! (register, login, user lookup, recommendations, search, book detail, and
//! the community API for reviews, likes, comments and feeds)
//! around a single request primitive and keeps the bearer token mirrored
//! into a persistent key-value store, so a restarted process picks up where
//! the previous one logged in.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use book_community_client::{BookCommunityClient, ClientConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = BookCommunityClient::from_config(&ClientConfig::default())?;
//!
//!     let body = client.login("alice", "s3cret").await?;
//!     if book_community_client::types::is_success(&body) {
//!         let books = client.search_books("rust programming", Some(5)).await?;
//!         println!("{books}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    BookCommunityClient                       │
//! │  register  login  get_user_info  get_recommendations  ...    │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ request(path, RequestConfig)
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │                        HttpClient                            │
//! │  URL + query encoding │ header merge │ 401 → clear token     │
//! └──────────────┬───────────────────────────────┬───────────────┘
//!                │                               │
//!        ┌───────┴────────┐             ┌────────┴────────┐
//!        │  TokenManager  │────────────▶│  KeyValueStore  │
//!        │ (memory copy)  │             │ Memory / File   │
//!        └────────────────┘             └─────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: document error variant fields and CLI args, then drop this

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types, JSON helpers and typed response views
pub mod types;

/// Client configuration loaded from YAML
pub mod config;

/// Persistent key-value storage
pub mod storage;

/// Bearer token management
pub mod auth;

/// HTTP request primitive
pub mod http;

/// BookCommunity endpoints
pub mod api;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use api::BookCommunityClient;
pub use config::ClientConfig;
pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
