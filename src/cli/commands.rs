//! CLI commands and argument parsing

use crate::types::ReviewOrder;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// BookCommunity API client
#[derive(Parser, Debug)]
#[command(name = "book-community")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the API, overriding the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Token store file, overriding the config file
    #[arg(long, global = true)]
    pub token_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account and store the returned token
    Register {
        username: String,
        password: String,
    },

    /// Log in and store the returned token
    Login {
        username: String,
        password: String,
    },

    /// Forget the stored token
    Logout,

    /// Show whether a token is stored
    Token,

    /// Look up a user profile
    User {
        user_id: u64,
    },

    /// Personalized book recommendations
    Recommend {
        /// Number of books to return (server default: 10)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Search books
    Search {
        query: String,

        /// Number of books to return (server default: 10)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Show book details
    Book {
        isbn: String,
    },

    /// List reviews
    Reviews {
        /// Only reviews of this book
        #[arg(long)]
        isbn: Option<String>,

        /// Only reviews by this user
        #[arg(long)]
        user: Option<u64>,

        /// Sort order
        #[arg(long, value_enum)]
        order: Option<ReviewOrderArg>,

        /// Page number, starting at 1
        #[arg(long)]
        page: Option<u32>,

        /// Reviews per page (server default: 20)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Show a single review
    Review {
        review_id: u64,
    },

    /// Publish a review
    PostReview {
        /// Review title
        #[arg(long)]
        title: String,

        /// Review text
        #[arg(long)]
        content: String,

        /// ISBN of the reviewed book
        #[arg(long)]
        isbn: Option<String>,

        /// Rating from 0 to 10
        #[arg(long, default_value_t = 0.0)]
        rating: f64,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Delete one of your reviews
    DeleteReview {
        review_id: u64,
    },

    /// Review feed (discovery by default)
    Feed {
        /// Reviews by followed users instead
        #[arg(long)]
        following: bool,

        /// `next_time` from the previous page
        #[arg(long)]
        latest_time: Option<i64>,

        /// Reviews per page (server default: 20)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Like a review
    Like {
        review_id: u64,

        /// Withdraw the like instead
        #[arg(long)]
        undo: bool,
    },

    /// Comment on a review
    Comment {
        review_id: u64,
        content: String,
    },

    /// List comments on a review
    Comments {
        review_id: u64,

        /// Page number, starting at 1
        #[arg(long)]
        page: Option<u32>,

        /// Comments per page (server default: 20)
        #[arg(long)]
        page_size: Option<u32>,
    },
}

/// Review sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReviewOrderArg {
    Latest,
    Popular,
    Rating,
}

impl From<ReviewOrderArg> for ReviewOrder {
    fn from(arg: ReviewOrderArg) -> Self {
        match arg {
            ReviewOrderArg::Latest => ReviewOrder::Latest,
            ReviewOrderArg::Popular => ReviewOrder::Popular,
            ReviewOrderArg::Rating => ReviewOrder::Rating,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Human-readable output
    Pretty,
}
