use crate::client::Client;
use crate::error::Result;
use crate::http::{Method, Transport};
use crate::types::{Params, UserRef};
use serde_json::Value;

/// Optional filters for [`Blocks::ids`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedIdsRequest {
    pub stringify_ids: Option<bool>,
    pub cursor: Option<i64>,
}

/// Optional filters for [`Blocks::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedListRequest {
    pub cursor: Option<i64>,
    pub include_entities: Option<bool>,
    pub skip_status: Option<bool>,
}

/// Optional tweet-shaping flags shared by block and unblock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockOptions {
    pub include_entities: Option<bool>,
    pub skip_status: Option<bool>,
}

/// Block operations (`/blocks/*`). Every call is gated on its own quota
/// bucket.
pub struct Blocks<'a, T: Transport> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> Blocks<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    /// IDs the authenticating user is blocking.
    pub async fn ids(&self, request: &BlockedIdsRequest) -> Result<Value> {
        self.client.check_rate_limit("blocks", Some("ids")).await?;

        let mut data = Params::new();
        if let Some(stringify_ids) = request.stringify_ids {
            data.push("stringify_ids", stringify_ids);
        }
        if let Some(cursor) = request.cursor {
            data.push("cursor", cursor);
        }
        self.client
            .send_request("/blocks/ids.json", Method::Get, &data, None)
            .await?
            .into_json()
    }

    /// Full user objects the authenticating user is blocking.
    pub async fn list(&self, request: &BlockedListRequest) -> Result<Value> {
        self.client.check_rate_limit("blocks", Some("list")).await?;

        let mut data = Params::new();
        if let Some(cursor) = request.cursor {
            data.push("cursor", cursor);
        }
        if let Some(entities) = request.include_entities {
            data.push("include_entities", entities);
        }
        if let Some(skip_status) = request.skip_status {
            data.push("skip_status", skip_status);
        }
        self.client
            .send_request("/blocks/list.json", Method::Get, &data, None)
            .await?
            .into_json()
    }

    /// Blocks the given user from following the authenticating user.
    pub async fn create(&self, user: UserRef, options: &BlockOptions) -> Result<Value> {
        self.client.check_rate_limit("blocks", Some("create")).await?;
        self.mutate("/blocks/create.json", user, options).await
    }

    /// Removes an existing block.
    pub async fn destroy(&self, user: UserRef, options: &BlockOptions) -> Result<Value> {
        self.client.check_rate_limit("blocks", Some("destroy")).await?;
        self.mutate("/blocks/destroy.json", user, options).await
    }

    async fn mutate(&self, path: &str, user: UserRef, options: &BlockOptions) -> Result<Value> {
        let mut data = Params::new();
        user.push_to(&mut data);
        if let Some(entities) = options.include_entities {
            data.push("include_entities", entities);
        }
        if let Some(skip_status) = options.skip_status {
            data.push("skip_status", skip_status);
        }
        self.client
            .send_request(path, Method::Post, &data, None)
            .await?
            .into_json()
    }
}
