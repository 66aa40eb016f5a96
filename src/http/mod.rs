use crate::error::Result;
use crate::types::Params;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE, USER_AGENT};
use std::collections::HashMap;
use std::fmt;

/// Extra request headers, name to value.
pub type Headers = HashMap<String, String>;

/// HTTP verbs the API surface uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw HTTP response as seen by the decoding pipeline.
///
/// Produced by a [`Transport`], consumed once, then discarded. Header
/// names are lowercased on construction so lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
    pub headers: HashMap<String, String>,
}

impl ApiResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_ascii_lowercase(), value.to_string());
            }
        }
        let body = response.text().await?;
        Ok(ApiResponse {
            status,
            body,
            headers,
        })
    }
}

/// Minimal transport shape the request pipeline depends on.
///
/// The default implementation is [`ReqwestTransport`]; tests and callers
/// with their own HTTP stack can inject anything that satisfies this.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, headers: Option<&Headers>) -> Result<ApiResponse>;
    async fn post(&self, url: &str, data: &Params, headers: Option<&Headers>)
        -> Result<ApiResponse>;
}

/// Encodes a parameter bag as `application/x-www-form-urlencoded`,
/// preserving insertion order.
pub(crate) fn form_encode(params: &Params) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> reqwest::Result<Self> {
        let mut default_headers = reqwest::header::HeaderMap::new();
        let ua = format!("twitter-rest/{}", env!("CARGO_PKG_VERSION"));
        if let Ok(value) = HeaderValue::from_str(&ua) {
            default_headers.insert(USER_AGENT, value);
        }
        let http = reqwest::Client::builder()
            .default_headers(default_headers)
            .use_rustls_tls()
            .build()?;
        Ok(Self { http })
    }

    /// Wraps an already-configured client (custom proxy, timeouts, ...).
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    fn apply_headers(
        mut request: reqwest::RequestBuilder,
        headers: Option<&Headers>,
    ) -> reqwest::RequestBuilder {
        if let Some(headers) = headers {
            for (name, value) in headers {
                request = request.header(name, value);
            }
        }
        request
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, headers: Option<&Headers>) -> Result<ApiResponse> {
        let request = Self::apply_headers(self.http.get(url), headers);
        let response = request.send().await?;
        ApiResponse::from_reqwest(response).await
    }

    async fn post(
        &self,
        url: &str,
        data: &Params,
        headers: Option<&Headers>,
    ) -> Result<ApiResponse> {
        let mut request = Self::apply_headers(self.http.post(url), headers);
        request = request
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .body(form_encode(data));
        let response = request.send().await?;
        ApiResponse::from_reqwest(response).await
    }
}
