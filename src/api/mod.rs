//! BookCommunity API
//!
//! `BookCommunityClient` is the entry point: it owns the HTTP client and the
//! token manager, and exposes one method per backend endpoint.
//!
//! # Endpoints
//!
//! | Method | HTTP | Path |
//! |---|---|---|
//! | `register` | POST | `/user/register/?username=&password=` |
//! | `login` | POST | `/user/login/?username=&password=` |
//! | `get_user_info` | GET | `/user/?user_id=` |
//! | `get_recommendations` | GET | `/recommend?top_k=` |
//! | `search_books` | GET | `/search?q=&top_k=` |
//! | `get_book_detail` | GET | `/book/{isbn}` |
//!
//! Community calls are sent under `<origin>/api`:
//!
//! | Method | HTTP | Path |
//! |---|---|---|
//! | `create_review` / `list_reviews` | POST / GET | `/reviews` |
//! | `get_review` / `update_review` / `delete_review` | GET / PUT / DELETE | `/reviews/{id}` |
//! | `like_review` / `unlike_review` | POST / DELETE | `/reviews/{id}/like` |
//! | `get_review_likes` | GET | `/reviews/{id}/likes` |
//! | `create_comment` / `list_comments` | POST / GET | `/reviews/{id}/comments` |
//! | `delete_comment` | DELETE | `/comments/{id}` |
//! | `get_discovery_feed` / `get_following_feed` | GET | `/feed`, `/feed/following` |

mod client;
pub mod endpoints;

pub use client::BookCommunityClient;
pub use endpoints::DEFAULT_TOP_K;
