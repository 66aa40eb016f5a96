use crate::client::Client;
use crate::error::Result;
use crate::http::{Method, Transport};
use crate::types::{Params, UserRef};
use serde_json::Value;

/// Optional filters for [`DirectMessages::received`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectMessagesRequest {
    pub since_id: Option<u64>,
    pub max_id: Option<u64>,
    pub count: Option<u32>,
    pub include_entities: Option<bool>,
    pub skip_status: Option<bool>,
}

/// Optional filters for [`DirectMessages::sent`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentDirectMessagesRequest {
    pub since_id: Option<u64>,
    pub max_id: Option<u64>,
    pub count: Option<u32>,
    pub page: Option<u32>,
    pub include_entities: Option<bool>,
}

/// Direct message operations (`/direct_messages*`).
///
/// Sending and deleting are not gated; the read endpoints each check
/// their quota bucket first.
pub struct DirectMessages<'a, T: Transport> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> DirectMessages<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    /// Most recent direct messages sent to the authenticating user.
    pub async fn received(&self, request: &DirectMessagesRequest) -> Result<Value> {
        self.client.check_rate_limit("direct_messages", None).await?;

        let mut data = Params::new();
        if let Some(since_id) = request.since_id {
            data.push("since_id", since_id);
        }
        if let Some(max_id) = request.max_id {
            data.push("max_id", max_id);
        }
        if let Some(count) = request.count {
            data.push("count", count);
        }
        if let Some(entities) = request.include_entities {
            data.push("include_entities", entities);
        }
        if let Some(skip_status) = request.skip_status {
            data.push("skip_status", skip_status);
        }
        self.client
            .send_request("/direct_messages.json", Method::Get, &data, None)
            .await?
            .into_json()
    }

    /// Most recent direct messages sent by the authenticating user.
    pub async fn sent(&self, request: &SentDirectMessagesRequest) -> Result<Value> {
        self.client
            .check_rate_limit("direct_messages", Some("sent"))
            .await?;

        let mut data = Params::new();
        if let Some(since_id) = request.since_id {
            data.push("since_id", since_id);
        }
        if let Some(max_id) = request.max_id {
            data.push("max_id", max_id);
        }
        if let Some(count) = request.count {
            data.push("count", count);
        }
        if let Some(page) = request.page {
            data.push("page", page);
        }
        if let Some(entities) = request.include_entities {
            data.push("include_entities", entities);
        }
        self.client
            .send_request("/direct_messages/sent.json", Method::Get, &data, None)
            .await?
            .into_json()
    }

    /// Sends a new direct message from the authenticating user.
    pub async fn send(&self, user: UserRef, text: &str) -> Result<Value> {
        let mut data = Params::new();
        user.push_to(&mut data);
        data.push("text", text);
        self.client
            .send_request("/direct_messages/new.json", Method::Post, &data, None)
            .await?
            .into_json()
    }

    /// A single direct message by ID.
    pub async fn show(&self, id: u64) -> Result<Value> {
        self.client
            .check_rate_limit("direct_messages", Some("show"))
            .await?;

        let mut data = Params::new();
        data.push("id", id);
        self.client
            .send_request("/direct_messages/show.json", Method::Get, &data, None)
            .await?
            .into_json()
    }

    /// Deletes a direct message the authenticating user owns.
    pub async fn destroy(&self, id: u64, include_entities: Option<bool>) -> Result<Value> {
        let mut data = Params::new();
        data.push("id", id);
        if let Some(entities) = include_entities {
            data.push("include_entities", entities);
        }
        self.client
            .send_request("/direct_messages/destroy.json", Method::Post, &data, None)
            .await?
            .into_json()
    }
}
