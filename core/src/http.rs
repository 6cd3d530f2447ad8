//! HTTP request descriptors and responses as plain data.
//!
//! # Design
//! Endpoint wrappers build `HttpRequest` values without touching the network.
//! A `Transport` turns a request into an `HttpResponse`; the executor then
//! interprets status and body. Keeping requests as data lets every wrapper be
//! tested by inspecting what it built, and lets the paginated collector derive
//! the next page's request from the previous one.
//!
//! All fields use owned types (`String`, `Vec`) so descriptors can be cloned
//! freely as page templates.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `base_url` is the scheme and authority (`https://api.voxeet.com`) with no
/// trailing slash; `path` starts with `/`. Query parameters and headers keep
/// insertion order so rendered URLs are deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub base_url: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, base_url: &str, path: impl Into<String>) -> Self {
        Self {
            method,
            base_url: base_url.trim_end_matches('/').to_string(),
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Returns a copy of this request with `key` set to `value`, replacing an
    /// existing parameter of the same name in place.
    pub fn with_query(&self, key: &str, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match next.query.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => next.query.push((key.to_string(), value)),
        }
        next
    }

    /// Look up a query parameter by name.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a header by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Full URL with percent-encoded query string.
    pub fn url(&self) -> String {
        let mut url = format!("{}{}", self.base_url, self.path);
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(&encode_pairs(&self.query));
        }
        url
    }
}

/// Encode key/value pairs as `k=v&k=v` with percent-encoding on both sides.
/// Also used for `application/x-www-form-urlencoded` bodies.
pub(crate) fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// An HTTP response described as plain data, produced by a `Transport`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
