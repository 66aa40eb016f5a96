use chrono::DateTime;
use std::fmt;
use thiserror::Error;

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Maximum body length quoted in `UnexpectedResponse` messages so a large
/// HTML error page does not balloon the error chain.
const MAX_BODY_SNIPPET: usize = 256;

pub(crate) fn body_snippet(body: &str) -> String {
    let mut snippet = body.to_string();
    if snippet.len() > MAX_BODY_SNIPPET {
        snippet.truncate(MAX_BODY_SNIPPET);
        snippet.push_str("... (truncated)");
    }
    snippet
}

/// When an exhausted rate-limit window opens again.
///
/// The status endpoint reports an absolute epoch (`At`), while the media
/// upload header reports a relative delay in seconds (`In`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitReset {
    /// Unix timestamp at which the window resets.
    At(i64),
    /// Seconds until the window resets.
    In(u64),
}

impl fmt::Display for RateLimitReset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RateLimitReset::At(epoch) => match DateTime::from_timestamp(epoch, 0) {
                Some(ts) => write!(f, "the window resets at {}", ts.to_rfc3339()),
                None => write!(f, "the window resets at epoch {epoch}"),
            },
            RateLimitReset::In(secs) => write!(f, "the window resets in {secs} seconds"),
        }
    }
}

/// Error type for the twitter-rest client.
///
/// Every failure propagates to the direct caller: the client performs no
/// retries, backoff, or suppression. Retry policy belongs to the caller.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Malformed caller input, rejected before any network activity.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The advisory quota check or the media rate-limit header reported an
    /// exhausted window.
    #[error("Twitter API rate limit exceeded; {reset}")]
    RateLimited { reset: RateLimitReset },

    /// Error decoded from the API's JSON error envelope.
    #[error("Twitter API error: {message}")]
    Api {
        message: String,
        code: Option<i64>,
    },

    /// The response did not match any shape this client knows how to read.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Transport-level failure from the underlying HTTP client.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response body that should have been JSON was not.
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn api(message: impl Into<String>, code: Option<i64>) -> Self {
        Self::Api {
            message: message.into(),
            code,
        }
    }

    /// Returns the reset hint when this is a rate-limit failure.
    #[must_use]
    pub fn rate_limit_reset(&self) -> Option<RateLimitReset> {
        match self {
            Error::RateLimited { reset } => Some(*reset),
            _ => None,
        }
    }
}
