// API client module: a small blocking HTTP client that talks to the URL
// shortener backend. Every call returns the raw status, Location header and
// body text; interpreting them is left to `protocol` so the session and
// dispatcher can be driven by any `Backend`, including test doubles.

use crate::config::Config;
use crate::error::{ClientError, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{StatusCode, Url};
use serde::Serialize;
use tracing::debug;

/// Login and user creation both send just the email.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EmailRequest {
    pub email: String,
}

/// Shorten request payload. Serialized as `{"longUrl": .., "userId": ..}`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    pub long_url: String,
    pub user_id: String,
}

/// What came back from the backend, before any decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        RawResponse {
            status,
            location: None,
            body: body.into(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// The backend's HTTP contract. One method per endpoint; each call blocks
/// until the whole response has been read.
pub trait Backend {
    /// POST `/users/login`
    fn login(&self, req: &EmailRequest) -> Result<RawResponse>;
    /// POST `/users`
    fn create_user(&self, req: &EmailRequest) -> Result<RawResponse>;
    /// POST `/urls/shorten`
    fn shorten(&self, req: &ShortenRequest) -> Result<RawResponse>;
    /// GET `/urls/{shortCode}`
    fn resolve(&self, short_code: &str) -> Result<RawResponse>;
    /// GET `/users/{userId}/urls`
    fn user_urls(&self, user_id: &str) -> Result<RawResponse>;
    /// GET `/urls`
    fn all_urls(&self) -> Result<RawResponse>;
}

/// Blocking `reqwest` client bound to one backend base address for the
/// whole session.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client for `config.base_url`. Redirects are never followed:
    /// resolution needs to see the 3xx itself.
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: "expected an absolute http(s) address".into(),
            });
        }

        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .map_err(ClientError::Setup)?;
        Ok(ApiClient { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base address.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Only fails for cannot-be-a-base URLs, which `new` rejects.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn execute(&self, operation: &'static str, req: RequestBuilder) -> Result<RawResponse> {
        let res = req.send().map_err(ClientError::transport(operation))?;
        let status = res.status();
        let location = res
            .headers()
            .get(LOCATION)
            .map(|v| header_text(v.as_bytes()));
        let body = res.text().map_err(ClientError::transport(operation))?;
        debug!(operation, %status, body_len = body.len(), "response received");
        Ok(RawResponse {
            status,
            location,
            body,
        })
    }

    fn get(&self, operation: &'static str, segments: &[&str]) -> Result<RawResponse> {
        let url = self.endpoint(segments);
        debug!(operation, %url, "GET");
        self.execute(operation, self.client.get(url))
    }

    fn post<T: Serialize>(
        &self,
        operation: &'static str,
        segments: &[&str],
        payload: &T,
    ) -> Result<RawResponse> {
        let url = self.endpoint(segments);
        debug!(operation, %url, "POST");
        self.execute(operation, self.client.post(url).json(payload))
    }
}

/// Header values may carry raw non-ASCII bytes. Valid UTF-8 is taken as
/// is; anything else is read as Latin-1, which is how servlet containers
/// write characters up to 0xFF.
pub(crate) fn header_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

impl Backend for ApiClient {
    fn login(&self, req: &EmailRequest) -> Result<RawResponse> {
        self.post("login", &["users", "login"], req)
    }

    fn create_user(&self, req: &EmailRequest) -> Result<RawResponse> {
        self.post("create user", &["users"], req)
    }

    fn shorten(&self, req: &ShortenRequest) -> Result<RawResponse> {
        self.post("shorten", &["urls", "shorten"], req)
    }

    fn resolve(&self, short_code: &str) -> Result<RawResponse> {
        self.get("resolve", &["urls", short_code])
    }

    fn user_urls(&self, user_id: &str) -> Result<RawResponse> {
        self.get("retrieve user URLs", &["users", user_id, "urls"])
    }

    fn all_urls(&self) -> Result<RawResponse> {
        self.get("retrieve all URLs", &["urls"])
    }
}
