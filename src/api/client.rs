//! BookCommunity API client

use super::endpoints;
use crate::auth::TokenManager;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::storage::{FileStore, KeyValueStore};
use crate::types::{self, JsonValue, Method, NewReview, ReviewListQuery, ReviewUpdate};
use std::sync::Arc;
use tracing::{info, warn};

/// Client for the BookCommunity REST API
///
/// Construct one per application and pass it where it is needed; clones
/// share the same token and connection pool.
///
/// Every method returns the parsed JSON body unchanged, whatever its
/// `status_code`. Only HTTP 401 turns into an error, and it clears the
/// stored token first.
///
/// Account and book calls go to the base URL. Review, comment and feed calls
/// go to the community API (`<origin>/api` unless overridden); both share
/// one token.
#[derive(Debug, Clone)]
pub struct BookCommunityClient {
    http: HttpClient,
    community: HttpClient,
    tokens: TokenManager,
}

impl BookCommunityClient {
    /// Create a client, adopting any token already persisted in `store`
    pub fn new(config: HttpClientConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let tokens = TokenManager::load(store)?;
        let community_config = HttpClientConfig {
            base_url: endpoints::community_base_url(&config.base_url)?,
            ..config.clone()
        };
        let http = HttpClient::new(config, tokens.clone())?;
        let community = HttpClient::new(community_config, tokens.clone())?;
        Ok(Self {
            http,
            community,
            tokens,
        })
    }

    /// Create a client from configuration, with a file-backed token store
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let store = FileStore::open(config.token_path()?)?;
        let client = Self::new(config.http_config(), Arc::new(store))?;
        match &config.community_base_url {
            Some(url) => client.with_community_base_url(url),
            None => Ok(client),
        }
    }

    /// Send community calls to `url` instead of `<origin>/api`
    pub fn with_community_base_url(mut self, url: impl Into<String>) -> Result<Self> {
        let config = HttpClientConfig {
            base_url: url.into(),
            ..self.http.config().clone()
        };
        self.community = HttpClient::new(config, self.tokens.clone())?;
        Ok(self)
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.http.config().base_url
    }

    /// Base URL of the community API
    pub fn community_base_url(&self) -> &str {
        &self.community.config().base_url
    }

    /// Current bearer token
    pub fn token(&self) -> Option<String> {
        self.tokens.token()
    }

    /// Whether a bearer token is held
    pub fn is_logged_in(&self) -> bool {
        self.tokens.has_token()
    }

    /// Adopt and persist a token
    pub fn set_token(&self, token: impl Into<String>) -> Result<()> {
        self.tokens.set(token)
    }

    /// Forget the token in memory and in storage
    pub fn clear_token(&self) -> Result<()> {
        self.tokens.clear()
    }

    /// Log out locally. The backend keeps no session to end.
    pub fn logout(&self) -> Result<()> {
        info!("Logging out");
        self.clear_token()
    }

    /// Send a request to `path` under the base URL and parse the JSON body
    pub async fn request(&self, path: &str, config: RequestConfig) -> Result<JsonValue> {
        self.http.request(path, config).await
    }

    /// Create an account; a successful body's token is adopted
    pub async fn register(&self, username: &str, password: &str) -> Result<JsonValue> {
        self.authenticate(endpoints::REGISTER_PATH, username, password)
            .await
    }

    /// Log in; a successful body's token is adopted
    pub async fn login(&self, username: &str, password: &str) -> Result<JsonValue> {
        self.authenticate(endpoints::LOGIN_PATH, username, password)
            .await
    }

    async fn authenticate(&self, path: &str, username: &str, password: &str) -> Result<JsonValue> {
        let body = self
            .request(path, endpoints::credentials(username, password))
            .await?;

        if types::is_success(&body) {
            match body.get("token").and_then(JsonValue::as_str) {
                Some(token) => {
                    self.set_token(token)?;
                    info!("Authenticated as {}", username);
                }
                None => warn!("{} succeeded but returned no token", path),
            }
        } else {
            warn!(
                "{} failed with status_code {:?}: {}",
                path,
                types::status_code(&body),
                types::status_message(&body).unwrap_or("no message")
            );
        }

        Ok(body)
    }

    /// Look up a user profile
    pub async fn get_user_info(&self, user_id: u64) -> Result<JsonValue> {
        self.request(endpoints::USER_PATH, endpoints::user_info(user_id))
            .await
    }

    /// Personalized recommendations; `None` asks for [`endpoints::DEFAULT_TOP_K`]
    pub async fn get_recommendations(&self, top_k: Option<usize>) -> Result<JsonValue> {
        self.request(endpoints::RECOMMEND_PATH, endpoints::recommendations(top_k))
            .await
    }

    /// Search books; `None` asks for [`endpoints::DEFAULT_TOP_K`] results
    pub async fn search_books(&self, query: &str, top_k: Option<usize>) -> Result<JsonValue> {
        self.request(endpoints::SEARCH_PATH, endpoints::search(query, top_k))
            .await
    }

    /// Details of a single book
    pub async fn get_book_detail(&self, isbn: &str) -> Result<JsonValue> {
        self.request(&endpoints::book_detail_path(isbn), RequestConfig::new())
            .await
    }

    // ========================================================================
    // Community API
    // ========================================================================

    /// Send a request to `path` under the community base URL
    pub async fn community_request(&self, path: &str, config: RequestConfig) -> Result<JsonValue> {
        self.community.request(path, config).await
    }

    /// Publish a review (requires login)
    pub async fn create_review(&self, review: &NewReview) -> Result<JsonValue> {
        let body = serde_json::to_value(review)?;
        self.community_request(endpoints::REVIEWS_PATH, RequestConfig::post().json(body))
            .await
    }

    /// List reviews, newest first unless `query.order_by` says otherwise
    pub async fn list_reviews(&self, query: &ReviewListQuery) -> Result<JsonValue> {
        self.community_request(endpoints::REVIEWS_PATH, endpoints::review_list(query))
            .await
    }

    /// Details of a single review
    pub async fn get_review(&self, review_id: u64) -> Result<JsonValue> {
        self.community_request(&endpoints::review_path(review_id), RequestConfig::new())
            .await
    }

    /// Change fields of one of the caller's reviews
    pub async fn update_review(&self, review_id: u64, update: &ReviewUpdate) -> Result<JsonValue> {
        let body = serde_json::to_value(update)?;
        let config = RequestConfig::new().method(Method::PUT).json(body);
        self.community_request(&endpoints::review_path(review_id), config)
            .await
    }

    /// Delete one of the caller's reviews
    pub async fn delete_review(&self, review_id: u64) -> Result<JsonValue> {
        let config = RequestConfig::new().method(Method::DELETE);
        self.community_request(&endpoints::review_path(review_id), config)
            .await
    }

    /// Like a review; liking twice is reported as success
    pub async fn like_review(&self, review_id: u64) -> Result<JsonValue> {
        self.community_request(&endpoints::review_like_path(review_id), RequestConfig::post())
            .await
    }

    /// Withdraw a like
    pub async fn unlike_review(&self, review_id: u64) -> Result<JsonValue> {
        let config = RequestConfig::new().method(Method::DELETE);
        self.community_request(&endpoints::review_like_path(review_id), config)
            .await
    }

    /// Users who liked a review
    pub async fn get_review_likes(
        &self,
        review_id: u64,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<JsonValue> {
        self.community_request(
            &endpoints::review_likes_path(review_id),
            endpoints::paged(page, page_size),
        )
        .await
    }

    /// Comment on a review
    pub async fn create_comment(&self, review_id: u64, content: &str) -> Result<JsonValue> {
        self.community_request(
            &endpoints::review_comments_path(review_id),
            endpoints::comment(content),
        )
        .await
    }

    /// Comments on a review
    pub async fn list_comments(
        &self,
        review_id: u64,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<JsonValue> {
        self.community_request(
            &endpoints::review_comments_path(review_id),
            endpoints::paged(page, page_size),
        )
        .await
    }

    /// Delete one of the caller's comments
    pub async fn delete_comment(&self, comment_id: u64) -> Result<JsonValue> {
        let config = RequestConfig::new().method(Method::DELETE);
        self.community_request(&endpoints::comment_path(comment_id), config)
            .await
    }

    /// Discovery feed of recent reviews from everyone
    pub async fn get_discovery_feed(
        &self,
        latest_time: Option<i64>,
        page_size: Option<u32>,
    ) -> Result<JsonValue> {
        self.community_request(endpoints::FEED_PATH, endpoints::feed(latest_time, page_size))
            .await
    }

    /// Feed of reviews by followed users (requires login)
    pub async fn get_following_feed(
        &self,
        latest_time: Option<i64>,
        page_size: Option<u32>,
    ) -> Result<JsonValue> {
        self.community_request(
            endpoints::FOLLOWING_FEED_PATH,
            endpoints::feed(latest_time, page_size),
        )
        .await
    }
}
