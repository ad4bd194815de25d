//! HTTP client module
//!
//! Provides the single request primitive the API wrappers delegate to.
//!
//! # Features
//!
//! - **URL Building**: Base URL + path + `encodeURIComponent`-style query string
//! - **Header Merging**: JSON content type, configured defaults, caller headers,
//!   then the bearer token
//! - **Unauthorized Handling**: HTTP 401 clears the stored token
//! - **Status Passthrough**: Every other status returns the parsed JSON body

mod client;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig, DEFAULT_BASE_URL,
};
