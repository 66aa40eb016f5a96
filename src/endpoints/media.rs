use crate::client::Client;
use crate::error::{Error, Result};
use crate::http::{Method, Transport};
use crate::types::Params;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;

/// Payload for [`Media::upload`]: exactly one of `media` (raw data passed
/// through as-is) or `media_data` (base64) must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaUpload {
    pub media: Option<String>,
    pub media_data: Option<String>,
    /// Comma-separated user IDs allowed to reuse the returned media_id,
    /// up to 100.
    pub additional_owners: Option<String>,
}

impl MediaUpload {
    /// Base64-encodes raw bytes into a `media_data` payload.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            media_data: Some(STANDARD.encode(bytes)),
            ..Self::default()
        }
    }

    pub fn from_base64(data: impl Into<String>) -> Self {
        Self {
            media_data: Some(data.into()),
            ..Self::default()
        }
    }

    /// Validates the payload and writes it into `params`. Rejection
    /// happens here, before any network activity.
    fn apply(&self, params: &mut Params) -> Result<()> {
        match (&self.media, &self.media_data) {
            (Some(_), Some(_)) => {
                return Err(Error::invalid_argument(
                    "only one media source may be supplied",
                ))
            }
            (None, None) => {
                return Err(Error::invalid_argument(
                    "a media source is required; supply raw data or a base64 payload",
                ))
            }
            (Some(raw), None) => params.push("media", raw),
            (None, Some(encoded)) => params.push("media_data", encoded),
        };
        if let Some(owners) = &self.additional_owners {
            params.push("additional_owners", owners);
        }
        Ok(())
    }
}

/// Media uploads (`/media/upload`). Gated on the upload quota bucket, and
/// additionally subject to the media rate-limit response header checked
/// by the dispatch pipeline.
pub struct Media<'a, T: Transport> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> Media<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    /// Uploads media for later attachment to a tweet or card.
    pub async fn upload(&self, upload: &MediaUpload) -> Result<Value> {
        let mut data = Params::new();
        upload.apply(&mut data)?;

        self.client.check_rate_limit("media", Some("upload")).await?;
        self.client
            .send_request("/media/upload.json", Method::Post, &data, None)
            .await?
            .into_json()
    }
}
