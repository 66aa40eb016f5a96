//! OAuth 1.0a collaborator: token custody, request signing, and the
//! shared response-validation step the dispatch pipeline relies on.

use crate::config::DEFAULT_API_URL;
use crate::error::{body_snippet, Error, Result};
use crate::http::{form_encode, ApiResponse, Headers, Method, Transport};
use crate::types::Params;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use log::warn;
use serde_json::Value;
use sha1::Sha1;
use url::Url;

/// Application (consumer) key pair issued for the registered app.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

/// Access token pair for the authenticating user. Opaque to the request
/// pipeline, which only ever reads it.
#[derive(Debug, Clone)]
pub struct Token {
    pub key: String,
    pub secret: String,
}

impl Token {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

/// Signs outgoing requests and validates what comes back.
///
/// Token acquisition (the three-legged dance) is out of scope here; the
/// caller supplies an already-issued token pair.
pub struct OAuth<T: Transport> {
    consumer: Credentials,
    token: Token,
    transport: T,
    api_url: String,
}

impl<T: Transport> OAuth<T> {
    pub fn new(consumer: Credentials, token: Token, transport: T) -> Self {
        Self {
            consumer,
            token,
            transport,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Overrides the base used by [`verify_credentials`](Self::verify_credentials)
    /// and [`end_session`](Self::end_session); tests point this at a mock
    /// server.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Read-only view of the access token.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Sends a signed request and validates the response before returning.
    ///
    /// `auth_params` are protocol parameters beyond the standard set
    /// (typically just `oauth_token`). For GET the data bag travels in
    /// the query string; for POST it becomes the form body. Both are part
    /// of the signature base string either way.
    pub async fn oauth_request(
        &self,
        url: &str,
        method: Method,
        auth_params: &Params,
        data: &Params,
        headers: Option<&Headers>,
    ) -> Result<ApiResponse> {
        let authorization = self.authorization_header(method, url, auth_params, data)?;
        let mut request_headers = headers.cloned().unwrap_or_default();
        request_headers.insert("Authorization".to_string(), authorization);

        let response = match method {
            Method::Get => {
                let full_url = append_query(url, data);
                self.transport.get(&full_url, Some(&request_headers)).await?
            }
            Method::Post => self.transport.post(url, data, Some(&request_headers)).await?,
        };

        self.validate_response(url, &response)?;
        Ok(response)
    }

    /// Checks whether the held token is still valid.
    ///
    /// The credential-verification endpoint is exempt from status
    /// classification, so a 401 surfaces as `Ok(false)` rather than an
    /// error.
    pub async fn verify_credentials(&self) -> Result<bool> {
        let mut auth_params = Params::new();
        auth_params.push("oauth_token", &self.token.key);
        let url = format!("{}/account/verify_credentials.json", self.api_url);
        let response = self
            .oauth_request(&url, Method::Get, &auth_params, &Params::new(), None)
            .await?;
        Ok(response.status == 200)
    }

    /// Ends the authenticating user's session, returning the null cookie
    /// response.
    pub async fn end_session(&self) -> Result<Value> {
        let mut auth_params = Params::new();
        auth_params.push("oauth_token", &self.token.key);
        let url = format!("{}/account/end_session.json", self.api_url);
        let response = self
            .oauth_request(&url, Method::Post, &auth_params, &Params::new(), None)
            .await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Classifies a non-success response into the API error taxonomy.
    ///
    /// Runs before `oauth_request` returns, so the dispatch layer never
    /// has to look at status codes itself. URLs containing
    /// `verify_credentials` tolerate any status.
    pub fn validate_response(&self, url: &str, response: &ApiResponse) -> Result<()> {
        if url.contains("verify_credentials") || response.status == 200 {
            return Ok(());
        }

        warn!("request to {url} answered HTTP {}", response.status);
        let envelope: Value = match serde_json::from_str(&response.body) {
            Ok(value) => value,
            Err(_) => {
                return Err(Error::UnexpectedResponse(format!(
                    "HTTP {} with undecodable error body: {}",
                    response.status,
                    body_snippet(&response.body)
                )))
            }
        };

        if let Some(message) = envelope.get("error").and_then(Value::as_str) {
            return Err(Error::api(message, None));
        }

        if let Some(first) = envelope
            .get("errors")
            .and_then(Value::as_array)
            .and_then(|errors| errors.first())
        {
            let message = first
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default();
            let code = first.get("code").and_then(Value::as_i64);
            return Err(Error::api(message, code));
        }

        Err(Error::UnexpectedResponse(format!(
            "HTTP {} with unrecognized error envelope: {}",
            response.status,
            body_snippet(&response.body)
        )))
    }

    fn authorization_header(
        &self,
        method: Method,
        url: &str,
        auth_params: &Params,
        data: &Params,
    ) -> Result<String> {
        let mut protocol: Vec<(String, String)> = vec![
            ("oauth_consumer_key".to_string(), self.consumer.key.clone()),
            ("oauth_nonce".to_string(), nonce()),
            (
                "oauth_signature_method".to_string(),
                "HMAC-SHA1".to_string(),
            ),
            (
                "oauth_timestamp".to_string(),
                Utc::now().timestamp().to_string(),
            ),
            ("oauth_version".to_string(), "1.0".to_string()),
        ];
        for (key, value) in auth_params.iter() {
            protocol.push((key.to_string(), value.to_string()));
        }

        let base = signature_base_string(method, url, &protocol, data)?;
        protocol.push(("oauth_signature".to_string(), self.sign(&base)));
        protocol.sort();

        let fields = protocol
            .iter()
            .map(|(key, value)| format!("{}=\"{}\"", key, percent_encode(value)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("OAuth {fields}"))
    }

    fn sign(&self, base: &str) -> String {
        let key = format!(
            "{}&{}",
            percent_encode(&self.consumer.secret),
            percent_encode(&self.token.secret)
        );
        // HMAC accepts keys of any length; this cannot fail.
        let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
            .expect("HMAC-SHA1 accepts keys of any length");
        mac.update(base.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }
}

fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn nonce() -> String {
    format!("{:032x}", fastrand::u128(..))
}

/// Appends the data bag to a URL's query string, percent-encoded.
fn append_query(url: &str, data: &Params) -> String {
    if data.is_empty() {
        return url.to_string();
    }
    let mut out = String::from(url);
    out.push(if url.contains('?') { '&' } else { '?' });
    out.push_str(&form_encode(data));
    out
}

/// Builds the RFC 5849 signature base string: method, base URL, and the
/// sorted, percent-encoded union of query, protocol, and body parameters.
fn signature_base_string(
    method: Method,
    url: &str,
    protocol: &[(String, String)],
    data: &Params,
) -> Result<String> {
    let parsed = Url::parse(url)
        .map_err(|e| Error::invalid_argument(format!("invalid request URL {url}: {e}")))?;

    let mut base_url = format!(
        "{}://{}",
        parsed.scheme(),
        parsed.host_str().unwrap_or_default()
    );
    if let Some(port) = parsed.port() {
        base_url.push(':');
        base_url.push_str(&port.to_string());
    }
    base_url.push_str(parsed.path());

    let mut pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    pairs.extend(protocol.iter().cloned());
    pairs.extend(data.iter().map(|(k, v)| (k.to_string(), v.to_string())));

    let mut encoded: Vec<(String, String)> = pairs
        .iter()
        .map(|(key, value)| (percent_encode(key), percent_encode(value)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    Ok(format!(
        "{}&{}&{}",
        method.as_str(),
        percent_encode(&base_url),
        percent_encode(&param_string)
    ))
}
