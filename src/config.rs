use std::collections::BTreeMap;
use std::env;

/// Option key for the API base URL prepended to relative request paths.
pub const API_URL: &str = "api.url";

/// Default REST API base for the current API version.
pub const DEFAULT_API_URL: &str = "https://api.twitter.com/1.1";

/// Runtime options for a client session.
///
/// A flat key/value bag owned by the session; the only key the request
/// pipeline reads is [`API_URL`]. Unknown keys are stored untouched so
/// callers can stash their own settings alongside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    values: BTreeMap<String, String>,
}

impl Options {
    /// Empty bag. With no [`API_URL`] set, relative paths are used as-is
    /// (empty prefix).
    pub fn new() -> Self {
        Self::default()
    }

    /// Bag pre-populated with the given API base URL.
    pub fn with_api_url(url: impl Into<String>) -> Self {
        let mut options = Self::new();
        options.set(API_URL, url);
        options
    }

    /// Load options from the environment.
    ///
    /// Env vars:
    /// - TWITTER_API_URL (default: https://api.twitter.com/1.1)
    pub fn from_env() -> Self {
        let api_url = env::var("TWITTER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::with_api_url(api_url)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }
}
