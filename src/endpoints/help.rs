use crate::client::Client;
use crate::error::Result;
use crate::http::{Method, Transport};
use crate::types::Params;
use serde_json::Value;

/// Service metadata (`/help/*`).
pub struct Help<'a, T: Transport> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> Help<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    /// Languages supported by the API.
    pub async fn languages(&self) -> Result<Value> {
        self.fetch("languages", "/help/languages.json").await
    }

    /// Current service configuration: t.co URL lengths, photo size
    /// limits, non-username slugs.
    pub async fn configuration(&self) -> Result<Value> {
        self.fetch("configuration", "/help/configuration.json").await
    }

    /// The privacy policy.
    pub async fn privacy(&self) -> Result<Value> {
        self.fetch("privacy", "/help/privacy.json").await
    }

    /// The terms of service.
    pub async fn tos(&self) -> Result<Value> {
        self.fetch("tos", "/help/tos.json").await
    }

    async fn fetch(&self, action: &str, path: &str) -> Result<Value> {
        self.client.check_rate_limit("help", Some(action)).await?;
        self.client
            .send_request(path, Method::Get, &Params::new(), None)
            .await?
            .into_json()
    }
}
