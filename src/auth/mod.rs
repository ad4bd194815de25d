//! Authentication module
//!
//! The BookCommunity API uses a single opaque bearer token issued by
//! register/login. `TokenManager` keeps the in-memory copy and mirrors every
//! change into a `KeyValueStore` so the token survives restarts.

mod token;

pub use token::{TokenManager, TOKEN_KEY};

#[cfg(test)]
mod tests;
