//! CLI module
//!
//! Command-line interface for the BookCommunity API.
//!
//! # Commands
//!
//! - `register` / `login` - Authenticate and store the returned token
//! - `logout` - Forget the stored token
//! - `token` - Show whether a token is stored
//! - `user` - Look up a user profile
//! - `recommend` - Personalized recommendations
//! - `search` - Search books
//! - `book` - Book details by ISBN
//! - `reviews` / `review` / `post-review` / `delete-review` - Book reviews
//! - `feed` - Discovery or following feed
//! - `like` / `comment` / `comments` - Reactions on a review

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, ReviewOrderArg};
pub use runner::Runner;
