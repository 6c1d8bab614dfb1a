// Runtime configuration: where the backend lives and which host name is
// shown in front of short codes. Both come from the environment with a
// literal fallback; nothing is persisted.

/// Env var overriding the backend base address.
pub const API_URL_VAR: &str = "URL_SHORTENER_API_URL";
/// Env var overriding the host printed in front of short codes.
pub const SHORT_HOST_VAR: &str = "URL_SHORTENER_SHORT_HOST";

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_SHORT_HOST: &str = "swisscom.com";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub short_host: String,
}

impl Config {
    pub fn new(base_url: &str, short_host: &str) -> Self {
        Config {
            base_url: base_url.trim_end_matches('/').to_string(),
            short_host: short_host.trim_end_matches('/').to_string(),
        }
    }

    /// Read `URL_SHORTENER_API_URL` and `URL_SHORTENER_SHORT_HOST`, falling
    /// back to the local development backend.
    pub fn from_env() -> Self {
        let base_url = std::env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.into());
        let short_host =
            std::env::var(SHORT_HOST_VAR).unwrap_or_else(|_| DEFAULT_SHORT_HOST.into());
        Config::new(&base_url, &short_host)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_API_URL, DEFAULT_SHORT_HOST)
    }
}
