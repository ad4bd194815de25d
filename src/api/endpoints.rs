//! Endpoint paths and request options
//!
//! Pure functions that turn call arguments into a path and a
//! [`RequestConfig`]; no I/O happens here.

use crate::error::Result;
use crate::http::RequestConfig;
use crate::types::ReviewListQuery;
use serde_json::json;
use url::Url;

/// Number of results requested when the caller does not say
pub const DEFAULT_TOP_K: usize = 10;

/// Registration endpoint
pub const REGISTER_PATH: &str = "/user/register/";

/// Login endpoint
pub const LOGIN_PATH: &str = "/user/login/";

/// User lookup endpoint
pub const USER_PATH: &str = "/user/";

/// Personalized recommendations endpoint
pub const RECOMMEND_PATH: &str = "/recommend";

/// Book search endpoint
pub const SEARCH_PATH: &str = "/search";

/// Credentials travel as query parameters, not in the body
pub fn credentials(username: &str, password: &str) -> RequestConfig {
    RequestConfig::post()
        .query("username", username)
        .query("password", password)
}

/// Options for a user lookup
pub fn user_info(user_id: u64) -> RequestConfig {
    RequestConfig::new().query("user_id", user_id)
}

/// Options for a recommendation request
pub fn recommendations(top_k: Option<usize>) -> RequestConfig {
    RequestConfig::new().query("top_k", top_k.unwrap_or(DEFAULT_TOP_K))
}

/// Options for a search request
pub fn search(query: &str, top_k: Option<usize>) -> RequestConfig {
    RequestConfig::new()
        .query("q", query)
        .query("top_k", top_k.unwrap_or(DEFAULT_TOP_K))
}

/// Path of a book detail, with the ISBN encoded as one path segment
pub fn book_detail_path(isbn: &str) -> String {
    format!("/book/{}", urlencoding::encode(isbn))
}

// ============================================================================
// Community API
// ============================================================================
//
// Reviews, likes, comments and feeds live under `/api` at the server root,
// not under the legacy base path the endpoints above use.

/// Path prefix of the community API on the server
pub const COMMUNITY_PREFIX: &str = "/api";

/// Review collection endpoint
pub const REVIEWS_PATH: &str = "/reviews";

/// Discovery feed endpoint
pub const FEED_PATH: &str = "/feed";

/// Following feed endpoint
pub const FOLLOWING_FEED_PATH: &str = "/feed/following";

/// Base URL of the community API: the origin of `base_url` plus `/api`
pub fn community_base_url(base_url: &str) -> Result<String> {
    let mut url = Url::parse(base_url)?;
    url.set_path(COMMUNITY_PREFIX);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Path of a single review
pub fn review_path(review_id: u64) -> String {
    format!("{REVIEWS_PATH}/{review_id}")
}

/// Path used to like and unlike a review
pub fn review_like_path(review_id: u64) -> String {
    format!("{REVIEWS_PATH}/{review_id}/like")
}

/// Path listing who liked a review
pub fn review_likes_path(review_id: u64) -> String {
    format!("{REVIEWS_PATH}/{review_id}/likes")
}

/// Path of a review's comments
pub fn review_comments_path(review_id: u64) -> String {
    format!("{REVIEWS_PATH}/{review_id}/comments")
}

/// Path of a single comment
pub fn comment_path(comment_id: u64) -> String {
    format!("/comments/{comment_id}")
}

/// Options for a review listing
pub fn review_list(query: &ReviewListQuery) -> RequestConfig {
    let mut config = paged(query.page, query.page_size);
    if let Some(user_id) = query.user_id {
        config = config.query("user_id", user_id);
    }
    if let Some(isbn) = &query.book_isbn {
        config = config.query("book_isbn", isbn);
    }
    if let Some(order) = query.order_by {
        config = config.query("order_by", order.as_str());
    }
    config
}

/// Options for a paged GET; absent values use the server defaults
pub fn paged(page: Option<u32>, page_size: Option<u32>) -> RequestConfig {
    let mut config = RequestConfig::new();
    if let Some(page) = page {
        config = config.query("page", page);
    }
    if let Some(size) = page_size {
        config = config.query("page_size", size);
    }
    config
}

/// Options for a feed page; `latest_time` is the previous page's `next_time`
pub fn feed(latest_time: Option<i64>, page_size: Option<u32>) -> RequestConfig {
    let mut config = RequestConfig::new();
    if let Some(time) = latest_time {
        config = config.query("latest_time", time);
    }
    if let Some(size) = page_size {
        config = config.query("page_size", size);
    }
    config
}

/// Body of a new comment
pub fn comment(content: &str) -> RequestConfig {
    RequestConfig::post().json(json!({ "content": content }))
}
