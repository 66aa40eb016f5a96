//! Client bindings for the Twitter REST API v1.1.
//!
//! Typed method calls are turned into OAuth 1.0a signed HTTP requests and
//! decoded JSON responses. The pipeline is: optional advisory rate-limit
//! gate, URL construction, signed dispatch, response decoding and error
//! classification. Endpoint groups hang off [`Client`] and share that
//! pipeline.
//!
//! ```no_run
//! use twitter_rest::{Client, Credentials, Options, ReqwestTransport, OAuth, Token, UserRef};
//!
//! # async fn run() -> twitter_rest::Result<()> {
//! let oauth = OAuth::new(
//!     Credentials::new("consumer-key", "consumer-secret"),
//!     Token::new("access-key", "access-secret"),
//!     ReqwestTransport::new()?,
//! );
//! let client = Client::new(Options::from_env(), oauth);
//!
//! let muted = client.mutes().create(UserRef::from("some_user")).await?;
//! println!("{muted}");
//! # Ok(())
//! # }
//! ```
//!
//! The client never retries and never caches rate-limit state: every
//! failure surfaces immediately to the caller, and every quota check is a
//! fresh fetch.

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod types;

pub use auth::{Credentials, OAuth, Token};
pub use client::Client;
pub use config::Options;
pub use error::{Error, RateLimitReset, Result};
pub use http::{ApiResponse, Headers, Method, ReqwestTransport, Transport};
pub use types::{Params, Payload, RateLimitBucket, RateLimitStatus, UserRef};
