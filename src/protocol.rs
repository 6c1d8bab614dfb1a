// Response decoding shared by the session and the dispatcher. Nothing in
// here panics or returns an error for a bad body: every response shape maps
// to an explicit outcome the caller branches on.

use crate::api::RawResponse;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// The authenticated user for this session. Only ever built from a
/// successful login or creation response.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub user_id: String,
    pub email: String,
}

/// Server-side view of one shortened URL. Extra fields are ignored.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrlRecord {
    pub id: String,
    pub long_url: String,
    pub short_code: String,
}

/// Result of decoding a response whose success body has a known shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    Ok(T),
    /// Success status, but the body did not match; carries the raw body.
    Malformed(String),
    /// Non-success status; carries the raw body.
    Failed { status: StatusCode, body: String },
}

fn decode<T: DeserializeOwned>(res: &RawResponse) -> Decoded<T> {
    if !res.status.is_success() {
        return Decoded::Failed {
            status: res.status,
            body: res.body.clone(),
        };
    }
    match serde_json::from_str(&res.body) {
        Ok(value) => Decoded::Ok(value),
        Err(_) => Decoded::Malformed(res.body.clone()),
    }
}

/// Decode a login or creation response. An empty `userId` is the unset
/// sentinel and is never adopted.
pub fn decode_identity(res: &RawResponse) -> Decoded<UserIdentity> {
    match decode::<UserIdentity>(res) {
        Decoded::Ok(identity) if identity.user_id.is_empty() => {
            Decoded::Malformed(res.body.clone())
        }
        other => other,
    }
}

/// Decode a URL listing, preserving server order.
pub fn decode_records(res: &RawResponse) -> Decoded<Vec<ShortUrlRecord>> {
    decode(res)
}

/// How a resolve response was interpreted. The backend may answer either
/// with a redirect or with a 200 carrying the long URL in the body, so the
/// variants are checked in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    Redirect(String),
    RedirectWithoutLocation,
    Body(String),
    EmptyBody,
    Failed(StatusCode),
}

impl ResolveOutcome {
    pub fn classify(res: &RawResponse) -> Self {
        if is_moved(res.status) {
            match &res.location {
                Some(location) => ResolveOutcome::Redirect(location.clone()),
                None => ResolveOutcome::RedirectWithoutLocation,
            }
        } else if res.status.is_success() {
            let body = res.body.trim();
            if body.is_empty() {
                ResolveOutcome::EmptyBody
            } else {
                ResolveOutcome::Body(body.to_string())
            }
        } else {
            ResolveOutcome::Failed(res.status)
        }
    }
}

/// Only the "moved" family counts; 300 and 304 do not point anywhere.
fn is_moved(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

/// Local pre-flight check for Shorten.
pub fn has_http_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Why a short URL was rejected before any request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortUrlError {
    MissingSlash,
    EmptyCode,
}

/// The short code is everything after the final `/`.
pub fn extract_short_code(short_url: &str) -> Result<&str, ShortUrlError> {
    match short_url.rsplit_once('/') {
        None => Err(ShortUrlError::MissingSlash),
        Some((_, "")) => Err(ShortUrlError::EmptyCode),
        Some((_, code)) => Ok(code),
    }
}

/// `short-host/<shortCode> -> <longUrl>`
pub fn render_record(short_host: &str, record: &ShortUrlRecord) -> String {
    format!("{}/{} -> {}", short_host, record.short_code, record.long_url)
}
