//! Credentials and API token acquisition.
//!
//! An application key/secret pair is exchanged over Basic auth for a bearer
//! token. The token is handed back to the caller as-is; nothing here stores
//! or refreshes it.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::client::RestClient;
use crate::error::Result;
use crate::http::{encode_pairs, HttpMethod, HttpRequest};
use crate::transport::Transport;

/// Application key and secret issued by the vendor dashboard.
#[derive(Clone)]
pub struct AppCredentials {
    pub key: String,
    pub secret: SecretString,
}

impl AppCredentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    fn basic_header(&self) -> String {
        let raw = format!("{}:{}", self.key, self.secret.expose_secret());
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredentials")
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Token type and access token, rendered into an `Authorization` header.
#[derive(Clone)]
pub struct BearerCredential {
    pub token_type: String,
    access_token: SecretString,
}

impl BearerCredential {
    pub fn new(token_type: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            token_type: token_type.into(),
            access_token: SecretString::from(access_token.into()),
        }
    }

    /// Shorthand for a `Bearer` token, as used by the streaming director.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self::new("Bearer", access_token)
    }

    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token.expose_secret())
    }
}

impl fmt::Debug for BearerCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerCredential")
            .field("token_type", &self.token_type)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Token returned by `/v1/auth/token`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct JwtToken {
    pub token_type: String,
    pub access_token: String,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl JwtToken {
    pub fn credential(&self) -> BearerCredential {
        BearerCredential::new(&self.token_type, &self.access_token)
    }
}

impl<T: Transport> RestClient<T> {
    /// `expires_in` is the requested token lifetime in seconds; the server
    /// default applies when `None`.
    pub fn build_get_api_token(&self, app: &AppCredentials, expires_in: Option<u32>) -> HttpRequest {
        let mut form = vec![("grant_type".to_string(), "client_credentials".to_string())];
        if let Some(secs) = expires_in {
            form.push(("expires_in".to_string(), secs.to_string()));
        }

        let mut request = HttpRequest::new(HttpMethod::Post, &self.config().api_url, "/v1/auth/token");
        request.headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            (
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            ),
            ("Authorization".to_string(), app.basic_header()),
        ];
        request.body = Some(encode_pairs(&form));
        request
    }

    pub fn get_api_token(&self, app: &AppCredentials, expires_in: Option<u32>) -> Result<JwtToken> {
        self.send(&self.build_get_api_token(app, expires_in))
    }
}
