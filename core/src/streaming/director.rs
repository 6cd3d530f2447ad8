//! Director: negotiates the WebSocket URL and JWT for publishing to or
//! viewing a stream.
//!
//! Responses arrive wrapped as `{"status": "success", "data": {...}}`; only
//! `data` is returned to the caller.

use serde::{Deserialize, Serialize};

use crate::auth::BearerCredential;
use crate::client::{with_json_body, RestClient};
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::transport::Transport;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PublishRequest<'a> {
    stream_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubscribeRequest<'a> {
    stream_account_id: &'a str,
    stream_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct Envelope<D> {
    data: D,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    /// WebSocket endpoints to connect to.
    pub urls: Vec<String>,
    pub jwt: String,
    pub stream_account_id: String,
    #[serde(default)]
    pub subscribe_requires_auth: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub urls: Vec<String>,
    pub jwt: String,
    pub stream_account_id: String,
}

impl<T: Transport> RestClient<T> {
    pub fn build_publish(&self, publish_token: &str, stream_name: &str) -> Result<HttpRequest> {
        let mut request = HttpRequest::new(HttpMethod::Post, &self.config().director_url, "/api/director/publish");
        request.headers.push((
            "Authorization".to_string(),
            BearerCredential::bearer(publish_token).authorization_header(),
        ));
        with_json_body(request, &PublishRequest { stream_name })
    }

    pub fn publish(&self, publish_token: &str, stream_name: &str) -> Result<PublishResponse> {
        let envelope: Envelope<PublishResponse> = self.send(&self.build_publish(publish_token, stream_name)?)?;
        Ok(envelope.data)
    }

    /// `subscribe_token` is only needed for streams that require auth to view.
    pub fn build_subscribe(
        &self,
        stream_account_id: &str,
        stream_name: &str,
        subscribe_token: Option<&str>,
    ) -> Result<HttpRequest> {
        let mut request =
            HttpRequest::new(HttpMethod::Post, &self.config().director_url, "/api/director/subscribe");
        if let Some(token) = subscribe_token {
            request.headers.push((
                "Authorization".to_string(),
                BearerCredential::bearer(token).authorization_header(),
            ));
        }
        with_json_body(
            request,
            &SubscribeRequest {
                stream_account_id,
                stream_name,
            },
        )
    }

    pub fn subscribe(
        &self,
        stream_account_id: &str,
        stream_name: &str,
        subscribe_token: Option<&str>,
    ) -> Result<SubscribeResponse> {
        let request = self.build_subscribe(stream_account_id, stream_name, subscribe_token)?;
        let envelope: Envelope<SubscribeResponse> = self.send(&request)?;
        Ok(envelope.data)
    }
}
