use crate::client::Client;
use crate::error::Result;
use crate::http::{Method, Transport};
use crate::types::{Params, UserRef};
use serde_json::Value;

/// Optional filters for [`Followers::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowersRequest {
    pub cursor: Option<i64>,
    pub count: Option<u32>,
    pub skip_status: Option<bool>,
    pub entities: Option<bool>,
}

/// Optional filters for [`Followers::ids`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowerIdsRequest {
    pub cursor: Option<i64>,
    pub stringify_ids: Option<bool>,
    pub count: Option<u32>,
}

/// Follower listings (`/followers/*`). Both reads are gated on their own
/// quota bucket before the listing call is issued.
pub struct Followers<'a, T: Transport> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> Followers<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    /// User objects following the given user, a page at a time.
    pub async fn list(&self, user: UserRef, request: &FollowersRequest) -> Result<Value> {
        self.client.check_rate_limit("followers", Some("list")).await?;

        let mut data = Params::new();
        user.push_to(&mut data);
        if let Some(cursor) = request.cursor {
            data.push("cursor", cursor);
        }
        if let Some(count) = request.count {
            data.push("count", count);
        }
        if let Some(skip_status) = request.skip_status {
            data.push("skip_status", skip_status);
        }
        if let Some(entities) = request.entities {
            data.push("entities", entities);
        }
        self.client
            .send_request("/followers/list.json", Method::Get, &data, None)
            .await?
            .into_json()
    }

    /// Follower IDs for the given user, up to 5000 per page.
    pub async fn ids(&self, user: UserRef, request: &FollowerIdsRequest) -> Result<Value> {
        self.client.check_rate_limit("followers", Some("ids")).await?;

        let mut data = Params::new();
        user.push_to(&mut data);
        if let Some(cursor) = request.cursor {
            data.push("cursor", cursor);
        }
        if let Some(stringify_ids) = request.stringify_ids {
            data.push("stringify_ids", stringify_ids);
        }
        if let Some(count) = request.count {
            data.push("count", count);
        }
        self.client
            .send_request("/followers/ids.json", Method::Get, &data, None)
            .await?
            .into_json()
    }
}
