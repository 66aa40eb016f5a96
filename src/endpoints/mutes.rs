use crate::client::Client;
use crate::error::Result;
use crate::http::{Method, Transport};
use crate::types::{Params, UserRef};
use serde_json::Value;

/// Optional filters for [`Mutes::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutedUsersRequest {
    pub cursor: Option<i64>,
    pub include_entities: Option<bool>,
    pub skip_status: Option<bool>,
}

/// Mute operations (`/mutes/users/*`).
///
/// Create and destroy are not gated: the API does not meter them the way
/// it meters the read endpoints.
pub struct Mutes<'a, T: Transport> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> Mutes<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    /// Mutes the given user on behalf of the authenticating user.
    pub async fn create(&self, user: UserRef) -> Result<Value> {
        let mut data = Params::new();
        user.push_to(&mut data);
        self.client
            .send_request("/mutes/users/create.json", Method::Post, &data, None)
            .await?
            .into_json()
    }

    /// Lifts a mute.
    pub async fn destroy(&self, user: UserRef) -> Result<Value> {
        let mut data = Params::new();
        user.push_to(&mut data);
        self.client
            .send_request("/mutes/users/destroy.json", Method::Post, &data, None)
            .await?
            .into_json()
    }

    /// IDs of users the authenticating user has muted.
    pub async fn ids(&self, cursor: Option<i64>) -> Result<Value> {
        let mut data = Params::new();
        if let Some(cursor) = cursor {
            data.push("cursor", cursor);
        }
        self.client
            .send_request("/mutes/users/ids.json", Method::Get, &data, None)
            .await?
            .into_json()
    }

    /// Full user objects the authenticating user has muted.
    pub async fn list(&self, request: &MutedUsersRequest) -> Result<Value> {
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
            .send_request("/mutes/users/list.json", Method::Get, &data, None)
            .await?
            .into_json()
    }
}
