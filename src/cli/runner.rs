//! CLI runner - executes commands

use crate::api::BookCommunityClient;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::error::{Result, ResultExt};
use crate::types::{
    self, AuthResponse, Book, BookDetailResponse, BookListResponse, CommentListResponse,
    JsonValue, NewReview, Review, ReviewListQuery, ReviewListResponse, ReviewResponse, UserInfo,
};
use serde_json::json;
use std::fmt::Write as _;
use tracing::{debug, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let client = BookCommunityClient::from_config(&config)?;
        debug!("Using API at {}", client.base_url());

        let body = match &self.cli.command {
            Commands::Register { username, password } => {
                client.register(username, password).await?
            }
            Commands::Login { username, password } => client.login(username, password).await?,
            Commands::Logout => {
                client.logout()?;
                json!({ "logged_in": false })
            }
            Commands::Token => json!({
                "logged_in": client.is_logged_in(),
                "token_file": config.token_path()?.display().to_string(),
            }),
            Commands::User { user_id } => client.get_user_info(*user_id).await?,
            Commands::Recommend { top_k } => client.get_recommendations(*top_k).await?,
            Commands::Search { query, top_k } => client.search_books(query, *top_k).await?,
            Commands::Book { isbn } => client.get_book_detail(isbn).await?,
            Commands::Reviews {
                isbn,
                user,
                order,
                page,
                page_size,
            } => {
                let query = ReviewListQuery {
                    page: *page,
                    page_size: *page_size,
                    user_id: *user,
                    book_isbn: isbn.clone(),
                    order_by: order.map(Into::into),
                };
                client.list_reviews(&query).await?
            }
            Commands::Review { review_id } => client.get_review(*review_id).await?,
            Commands::PostReview {
                title,
                content,
                isbn,
                rating,
                tags,
            } => {
                let review = NewReview {
                    title: title.clone(),
                    content: content.clone(),
                    book_isbn: isbn.clone(),
                    rating: *rating,
                    tags: tags.clone(),
                    ..Default::default()
                };
                client.create_review(&review).await?
            }
            Commands::DeleteReview { review_id } => client.delete_review(*review_id).await?,
            Commands::Feed {
                following,
                latest_time,
                page_size,
            } => {
                if *following {
                    client.get_following_feed(*latest_time, *page_size).await?
                } else {
                    client.get_discovery_feed(*latest_time, *page_size).await?
                }
            }
            Commands::Like { review_id, undo } => {
                if *undo {
                    client.unlike_review(*review_id).await?
                } else {
                    client.like_review(*review_id).await?
                }
            }
            Commands::Comment { review_id, content } => {
                client.create_comment(*review_id, content).await?
            }
            Commands::Comments {
                review_id,
                page,
                page_size,
            } => client.list_comments(*review_id, *page, *page_size).await?,
        };

        self.emit(&body)
    }

    /// Load the config file (if any) and apply command-line overrides
    pub fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ClientConfig::default(),
        };

        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(token_file) = &self.cli.token_file {
            config.token_file = Some(token_file.clone());
        }

        config.validate()?;
        Ok(config)
    }

    /// Print a response body in the selected format
    fn emit(&self, body: &JsonValue) -> Result<()> {
        if let Some(code) = types::status_code(body) {
            if code != types::STATUS_SUCCESS {
                warn!(
                    "API returned status_code {}: {}",
                    code,
                    types::status_message(body).unwrap_or("no message")
                );
            }
        }

        let output = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(body)?,
            OutputFormat::Pretty => render_pretty(&self.cli.command, body)?,
        };
        println!("{output}");
        Ok(())
    }
}

/// Human-readable rendering; book lists and details get a text layout
fn render_pretty(command: &Commands, body: &JsonValue) -> Result<String> {
    if !types::is_success(body) {
        return Ok(serde_json::to_string_pretty(body)?);
    }

    match command {
        Commands::Register { .. } | Commands::Login { .. } => {
            let auth: AuthResponse = types::decode(body)?;
            Ok(render_auth(&auth))
        }
        Commands::User { .. } => match body.get("user") {
            Some(user) => Ok(render_user(&types::decode::<UserInfo>(user)?)),
            None => Ok(serde_json::to_string_pretty(body)?),
        },
        Commands::Reviews { .. } | Commands::Feed { .. } => {
            let list: ReviewListResponse = types::decode(body)?;
            Ok(render_review_list(&list))
        }
        Commands::Review { .. } | Commands::PostReview { .. } => {
            let detail: ReviewResponse = types::decode(body)?;
            match detail.review {
                Some(review) => Ok(render_review(&review)),
                None => Ok(serde_json::to_string_pretty(body)?),
            }
        }
        Commands::Comments { .. } => {
            let list: CommentListResponse = types::decode(body)?;
            Ok(render_comments(&list))
        }
        Commands::Recommend { .. } | Commands::Search { .. } => {
            let list: BookListResponse = types::decode(body)?;
            Ok(render_book_list(&list))
        }
        Commands::Book { .. } => {
            let detail: BookDetailResponse = types::decode(body)?;
            match detail.book {
                Some(book) => Ok(render_book(&book)),
                None => Ok(serde_json::to_string_pretty(body)?),
            }
        }
        _ => Ok(serde_json::to_string_pretty(body)?),
    }
}

fn render_book_list(list: &BookListResponse) -> String {
    let mut out = String::new();
    for (i, book) in list.books.iter().enumerate() {
        let _ = write!(out, "{:>2}. {}", i + 1, book.title);
        if !book.author.is_empty() {
            let _ = write!(out, " by {}", book.author);
        }
        let _ = writeln!(out, " [{}] ({:.1})", book.isbn, book.rating);
        if !book.reason.is_empty() {
            let _ = writeln!(out, "    {}", book.reason);
        }
    }
    let _ = write!(out, "{} book(s)", list.total.max(list.books.len()));
    if let Some(message) = &list.message {
        let _ = write!(out, "\n{message}");
    }
    out
}

fn render_auth(auth: &AuthResponse) -> String {
    let who = auth
        .user_id
        .map_or_else(|| "user".to_string(), |id| format!("user {id}"));
    if auth.token.is_some() {
        format!("Logged in as {who}; token stored")
    } else {
        format!("Authenticated as {who}, but no token was returned")
    }
}

fn render_user(user: &UserInfo) -> String {
    let mut out = format!("{} (#{})\nFollowers: {}", user.username, user.id, user.follower_count);
    if user.is_followed {
        out.push_str("\nYou follow this user");
    }
    out
}

fn render_review_list(list: &ReviewListResponse) -> String {
    let mut out = String::new();
    for review in &list.reviews {
        let author = review
            .author
            .as_ref()
            .map_or("unknown", |a| a.username.as_str());
        let _ = writeln!(
            out,
            "#{} {} by {} ({:.1}, {} likes, {} comments)",
            review.id, review.title, author, review.rating, review.like_count, review.comment_count
        );
    }
    let _ = write!(out, "{} review(s)", list.total.max(list.reviews.len() as u64));
    if list.has_more {
        let _ = write!(out, "\nMore: --latest-time {}", list.next_time);
    }
    out
}

fn render_review(review: &Review) -> String {
    let mut out = format!("#{} {}", review.id, review.title);
    if let Some(author) = &review.author {
        let _ = write!(out, "\nBy: {}", author.username);
    }
    if !review.book_title.is_empty() || !review.book_isbn.is_empty() {
        let _ = write!(out, "\nBook: {} [{}]", review.book_title, review.book_isbn);
    }
    let _ = write!(out, "\nRating: {:.1}", review.rating);
    if !review.tags.is_empty() {
        let _ = write!(out, "\nTags: {}", review.tags.join(", "));
    }
    let _ = write!(out, "\n\n{}", review.content);
    out
}

fn render_comments(list: &CommentListResponse) -> String {
    let mut out = String::new();
    for comment in &list.comments {
        let user = comment
            .user
            .as_ref()
            .map_or("unknown", |u| u.username.as_str());
        let _ = writeln!(out, "[{}] {}: {}", comment.id, user, comment.content);
    }
    let _ = write!(out, "{} comment(s)", list.total.max(list.comments.len() as u64));
    out
}

fn render_book(book: &Book) -> String {
    let mut out = format!("{}\nISBN: {}", book.title, book.isbn);
    let fields = [
        ("Author", &book.author),
        ("Publisher", &book.publisher),
        ("Published", &book.pub_date),
        ("Cover", &book.cover_url),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            let _ = write!(out, "\n{label}: {value}");
        }
    }
    if book.rating > 0.0 {
        let _ = write!(out, "\nRating: {:.1}", book.rating);
    }
    if !book.summary.is_empty() {
        let _ = write!(out, "\n\n{}", book.summary);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("book-community").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_parse_search_command() {
        let cli = parse(&["search", "rust lang", "-k", "5", "--format", "pretty"]);
        assert_eq!(cli.format, OutputFormat::Pretty);
        match cli.command {
            Commands::Search { query, top_k } => {
                assert_eq!(query, "rust lang");
                assert_eq!(top_k, Some(5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let cli = parse(&[
            "--base-url",
            "http://127.0.0.1:9000/douyin",
            "--token-file",
            "/tmp/bc-token.json",
            "token",
        ]);
        let config = Runner::new(cli).load_config().unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000/douyin");
        assert_eq!(
            config.token_file.as_deref(),
            Some(std::path::Path::new("/tmp/bc-token.json"))
        );
    }

    #[test]
    fn test_load_config_missing_file_has_context() {
        let cli = parse(&["-C", "/definitely/not/here.yaml", "token"]);
        let err = Runner::new(cli).load_config().unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Failed to load config /definitely/not/here.yaml"));
    }

    #[test]
    fn test_render_book_list() {
        let body = json!({
            "status_code": 0,
            "books": [
                {"isbn": "9787111213826", "title": "Thinking in Java", "author": "Bruce Eckel", "rating": 9.1, "reason": "You liked Effective Java"}
            ],
            "total": 1
        });
        let out = render_pretty(&Commands::Recommend { top_k: None }, &body).unwrap();
        assert_eq!(
            out,
            " 1. Thinking in Java by Bruce Eckel [9787111213826] (9.1)\n    You liked Effective Java\n1 book(s)"
        );
    }

    #[test]
    fn test_render_book_detail() {
        let body = json!({
            "status_code": 0,
            "book": {"isbn": "978-0-13", "title": "Sample Book"}
        });
        let out = render_pretty(
            &Commands::Book {
                isbn: "978-0-13".to_string(),
            },
            &body,
        )
        .unwrap();
        assert_eq!(out, "Sample Book\nISBN: 978-0-13");
    }

    #[test]
    fn test_render_login_never_prints_token() {
        let body = json!({"status_code": 0, "user_id": 7, "token": "secret"});
        let out = render_pretty(
            &Commands::Login {
                username: "bob".to_string(),
                password: "pw".to_string(),
            },
            &body,
        )
        .unwrap();
        assert_eq!(out, "Logged in as user 7; token stored");
        assert!(!out.contains("secret"));
    }

    #[test]
    fn test_render_user() {
        let body = json!({
            "status_code": 0,
            "user": {"id": 42, "username": "alice", "follower_count": 3, "is_followed": true}
        });
        let out = render_pretty(&Commands::User { user_id: 42 }, &body).unwrap();
        assert_eq!(out, "alice (#42)\nFollowers: 3\nYou follow this user");
    }

    #[test]
    fn test_render_feed_page() {
        let body = json!({
            "status_code": 0,
            "reviews": [{
                "id": 3,
                "title": "Worth it",
                "rating": 8.5,
                "author": {"id": 1, "username": "alice"},
                "like_count": 4,
                "comment_count": 1
            }],
            "next_time": 1700000000,
            "has_more": true
        });
        let command = Commands::Feed {
            following: false,
            latest_time: None,
            page_size: None,
        };
        let out = render_pretty(&command, &body).unwrap();
        assert_eq!(
            out,
            "#3 Worth it by alice (8.5, 4 likes, 1 comments)\n1 review(s)\nMore: --latest-time 1700000000"
        );
    }

    #[test]
    fn test_parse_post_review_tags() {
        let cli = parse(&[
            "post-review", "--title", "T", "--content", "C", "--rating", "7.5", "--tag", "a",
            "--tag", "b",
        ]);
        match cli.command {
            Commands::PostReview { rating, tags, isbn, .. } => {
                assert_eq!(rating, 7.5);
                assert_eq!(tags, vec!["a".to_string(), "b".to_string()]);
                assert!(isbn.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_render_failure_falls_back_to_json() {
        let body = json!({"status_code": 2003, "message": "missing q"});
        let out = render_pretty(
            &Commands::Search {
                query: String::new(),
                top_k: None,
            },
            &body,
        )
        .unwrap();
        assert!(out.contains("\"status_code\": 2003"));
    }
}
