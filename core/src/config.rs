//! Host and timeout configuration.
//!
//! Each API family lives on its own origin. Defaults point at the vendor's
//! production hosts; `with_base_url` collapses them onto one origin for a
//! local mock server, and `from_env` overlays environment variables.

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.dolby.io";
pub const DEFAULT_COMMUNICATIONS_URL: &str = "https://api.voxeet.com";
pub const DEFAULT_MEDIA_URL: &str = "https://api.dolby.com";
pub const DEFAULT_DIRECTOR_URL: &str = "https://director.millicast.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Authentication API (`/v1/auth/token`).
    pub api_url: String,
    /// Communications monitor API (`/v1/monitor/...`).
    pub communications_url: String,
    /// Media API (`/media/...`).
    pub media_url: String,
    /// Streaming director (`/api/director/...`).
    pub director_url: String,
    /// Applied by `UreqTransport` as a whole-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            communications_url: DEFAULT_COMMUNICATIONS_URL.to_string(),
            media_url: DEFAULT_MEDIA_URL.to_string(),
            director_url: DEFAULT_DIRECTOR_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Every API family served from `base_url`.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = trim(base_url);
        Self {
            api_url: base.clone(),
            communications_url: base.clone(),
            media_url: base.clone(),
            director_url: base,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Defaults overlaid with `MEDIA_REST_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(v) = lookup("MEDIA_REST_API_URL") {
            config.api_url = trim(&v);
        }
        if let Some(v) = lookup("MEDIA_REST_COMMUNICATIONS_URL") {
            config.communications_url = trim(&v);
        }
        if let Some(v) = lookup("MEDIA_REST_MEDIA_URL") {
            config.media_url = trim(&v);
        }
        if let Some(v) = lookup("MEDIA_REST_DIRECTOR_URL") {
            config.director_url = trim(&v);
        }
        if let Some(v) = lookup("MEDIA_REST_TIMEOUT_SECS") {
            match v.parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(_) => tracing::warn!(value = %v, "ignoring invalid MEDIA_REST_TIMEOUT_SECS"),
            }
        }
        config
    }
}

fn trim(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
