use crate::error::Error;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Insertion-ordered request parameter bag.
///
/// Built fresh for every call and never shared between calls. Order only
/// affects the final query string, not request semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a key/value pair. Values go through `ToString`, so numbers
    /// and booleans can be pushed directly.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.entries.push((key.into(), value.to_string()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A user identified either by numeric ID or screen name.
///
/// Constructed explicitly by the caller; the wire parameter is chosen by
/// the variant (`user_id` vs `screen_name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    ById(u64),
    ByName(String),
}

impl UserRef {
    /// Writes the identifier into `params` under the matching wire key.
    pub(crate) fn push_to(&self, params: &mut Params) {
        match self {
            UserRef::ById(id) => params.push("user_id", id),
            UserRef::ByName(name) => params.push("screen_name", name),
        };
    }
}

impl From<u64> for UserRef {
    fn from(id: u64) -> Self {
        UserRef::ById(id)
    }
}

impl From<&str> for UserRef {
    fn from(name: &str) -> Self {
        UserRef::ByName(name.to_string())
    }
}

impl From<String> for UserRef {
    fn from(name: String) -> Self {
        UserRef::ByName(name)
    }
}

impl TryFrom<&Value> for UserRef {
    type Error = Error;

    /// Accepts JSON numbers (as `user_id`) and strings (as `screen_name`).
    /// Every other shape is rejected before any network activity.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        if let Some(id) = value.as_u64() {
            Ok(UserRef::ById(id))
        } else if let Some(name) = value.as_str() {
            Ok(UserRef::ByName(name.to_string()))
        } else {
            Err(Error::invalid_argument(
                "user must be identified by a numeric ID or a screen name",
            ))
        }
    }
}

/// Decoded outcome of a dispatched request.
///
/// Endpoints that intentionally answer with a 30x produce `Redirect`
/// carrying the `Location` header; everything else decodes to JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Redirect(String),
}

impl Payload {
    pub fn into_json(self) -> crate::error::Result<Value> {
        match self {
            Payload::Json(value) => Ok(value),
            Payload::Redirect(location) => Err(Error::UnexpectedResponse(format!(
                "expected a JSON body, got a redirect to {location}"
            ))),
        }
    }

    pub fn into_redirect(self) -> crate::error::Result<String> {
        match self {
            Payload::Redirect(location) => Ok(location),
            Payload::Json(_) => Err(Error::UnexpectedResponse(
                "expected a redirect, got a JSON body".to_string(),
            )),
        }
    }
}

/// One rate-limit bucket from the status endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RateLimitBucket {
    #[serde(default)]
    pub limit: Option<u32>,
    pub remaining: u32,
    pub reset: i64,
}

/// Snapshot returned by `/application/rate_limit_status.json`.
///
/// Keyed by resource family, then by bucket path (`/followers/ids`).
/// Fetched fresh for every check and never cached across calls.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitStatus {
    #[serde(default)]
    pub resources: HashMap<String, HashMap<String, RateLimitBucket>>,
}

impl RateLimitStatus {
    pub fn bucket(&self, family: &str, property: &str) -> Option<&RateLimitBucket> {
        self.resources.get(family).and_then(|m| m.get(property))
    }
}
