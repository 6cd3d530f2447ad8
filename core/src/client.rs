//! Client handle shared by every endpoint wrapper.
//!
//! # Design
//! `RestClient` holds only configuration and a transport and carries no
//! mutable state between calls, so concurrent callers cannot interfere with
//! each other. Each endpoint is split into a `build_*` method that produces
//! an `HttpRequest` and an executing method that sends it through the
//! executor or the paginated collector. The endpoint methods are spread over
//! the `auth`, `communications`, `media`, and `streaming` modules.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::BearerCredential;
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::executor;
use crate::http::{HttpMethod, HttpRequest};
use crate::pagination::{self, CollectOptions, PageCursor};
use crate::transport::{Transport, UreqTransport};

#[derive(Debug, Clone)]
pub struct RestClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
    collect_options: CollectOptions,
}

impl RestClient<UreqTransport> {
    /// Client over a ureq transport using `config.timeout`.
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> RestClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            collect_options: CollectOptions::default(),
        }
    }

    /// Cap the number of pages any `*_all` method will fetch.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.collect_options.max_pages = Some(max_pages);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn send<R: DeserializeOwned>(&self, request: &HttpRequest) -> Result<R> {
        executor::execute(&self.transport, request)
    }

    pub(crate) fn send_no_content(&self, request: &HttpRequest) -> Result<()> {
        executor::execute_no_content(&self.transport, request)
    }

    pub(crate) fn collect<R: DeserializeOwned>(
        &self,
        template: &HttpRequest,
        items_field: &str,
        cursor: PageCursor,
    ) -> Result<Vec<R>> {
        pagination::collect_all(&self.transport, template, items_field, cursor, self.collect_options)
    }
}

/// `GET` request carrying a bearer credential and a JSON `Accept` header.
pub(crate) fn authorized_get(base_url: &str, path: impl Into<String>, credential: &BearerCredential) -> HttpRequest {
    authorized(HttpMethod::Get, base_url, path, credential)
}

pub(crate) fn authorized(
    method: HttpMethod,
    base_url: &str,
    path: impl Into<String>,
    credential: &BearerCredential,
) -> HttpRequest {
    let mut request = HttpRequest::new(method, base_url, path);
    request.headers.push(("Accept".to_string(), "application/json".to_string()));
    request
        .headers
        .push(("Authorization".to_string(), credential.authorization_header()));
    request
}

/// Attach `payload` as a JSON body.
pub(crate) fn with_json_body(mut request: HttpRequest, payload: &impl Serialize) -> Result<HttpRequest> {
    let body = serde_json::to_string(payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    request
        .headers
        .push(("Content-Type".to_string(), "application/json".to_string()));
    request.body = Some(body);
    Ok(request)
}
