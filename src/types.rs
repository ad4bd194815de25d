//! Common types used throughout the client
//!
//! This module contains shared type aliases, the HTTP method enum, helpers
//! for the application-level `status_code` carried in every response body,
//! and typed views over the bodies the BookCommunity backend returns.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Application Status Codes
// ============================================================================

/// `status_code` reported by the backend on success
pub const STATUS_SUCCESS: i64 = 0;

/// `status_code` reported when a required parameter is missing
pub const STATUS_MISSING_PARAM: i64 = 2003;

/// `status_code` reported when the recommendation/search service fails
pub const STATUS_SERVICE_ERROR: i64 = 3002;

/// Read the application-level `status_code` from a response body
pub fn status_code(body: &JsonValue) -> Option<i64> {
    body.get("status_code").and_then(JsonValue::as_i64)
}

/// Whether a response body reports application-level success
pub fn is_success(body: &JsonValue) -> bool {
    status_code(body) == Some(STATUS_SUCCESS)
}

/// Human-readable message from a response body, if any
///
/// The backend uses `status_msg` on user endpoints and `message` on book
/// endpoints.
pub fn status_message(body: &JsonValue) -> Option<&str> {
    body.get("status_msg")
        .or_else(|| body.get("message"))
        .and_then(JsonValue::as_str)
}

/// Decode a response body into one of the typed views below
pub fn decode<T: DeserializeOwned>(body: &JsonValue) -> Result<T> {
    Ok(T::deserialize(body)?)
}

// ============================================================================
// Typed Response Views
// ============================================================================

/// Body returned by register and login
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub status_code: i64,
    #[serde(default)]
    pub status_msg: Option<String>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub token: Option<String>,
}

/// A book as returned by recommendation, search and detail endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub cover_url: String,
    pub rating: f32,
    /// Why the book was recommended
    pub reason: String,
    pub publisher: String,
    pub pub_date: String,
    pub summary: String,
}

/// Body returned by `/recommend` and `/search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookListResponse {
    pub status_code: i64,
    pub message: Option<String>,
    pub books: Vec<Book>,
    pub total: usize,
}

/// Body returned by `/book/{isbn}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookDetailResponse {
    pub status_code: i64,
    pub message: Option<String>,
    pub book: Option<Book>,
}

/// Brief user profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    pub id: u64,
    pub username: String,
    pub avatar: Option<String>,
    pub follower_count: u64,
    pub is_followed: bool,
}

/// A book review on the community API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub book_isbn: String,
    pub book_title: String,
    pub images: Vec<String>,
    pub cover_url: String,
    pub rating: f64,
    pub tags: Vec<String>,
    pub author: Option<UserInfo>,
    pub like_count: u64,
    pub comment_count: u64,
    pub view_count: u64,
    pub collect_count: u64,
    /// Unix seconds
    pub created_at: i64,
    pub updated_at: i64,
    pub is_liked: bool,
    pub is_collected: bool,
}

/// Body returned by review list and feed endpoints
///
/// Lists carry `total`; feeds carry `next_time` and `has_more`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewListResponse {
    pub status_code: i64,
    pub status_msg: Option<String>,
    pub reviews: Vec<Review>,
    pub total: u64,
    /// Pass back as `latest_time` to fetch the next feed page
    pub next_time: i64,
    pub has_more: bool,
}

/// Body returned by review detail, create and update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewResponse {
    pub status_code: i64,
    pub status_msg: Option<String>,
    pub review: Option<Review>,
}

/// A comment on a review
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub id: u64,
    pub content: String,
    pub user: Option<UserInfo>,
    pub created_at: i64,
}

/// Body returned by the comment list endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentListResponse {
    pub status_code: i64,
    pub status_msg: Option<String>,
    pub comments: Vec<Comment>,
    pub total: u64,
}

// ============================================================================
// Community Requests
// ============================================================================

/// Body for creating a review
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_title: Option<String>,
    /// At most 9; the first one becomes the cover
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// 0 to 10
    pub rating: f64,
    /// At most 10
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Partial update of a review; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Sort order for review lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewOrder {
    #[default]
    Latest,
    Popular,
    Rating,
}

impl ReviewOrder {
    /// Value sent as `order_by`
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewOrder::Latest => "latest",
            ReviewOrder::Popular => "popular",
            ReviewOrder::Rating => "rating",
        }
    }
}

/// Filters and paging for a review list; `None` leaves the server default
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub user_id: Option<u64>,
    pub book_isbn: Option<String>,
    pub order_by: Option<ReviewOrder>,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
