//! Request executor: one round trip, status check, typed decode.

use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Send `request` once and decode the JSON body as `T`.
///
/// No retries. A body whose shape does not match `T` is a `DecodeError`.
pub fn execute<T, R>(transport: &R, request: &HttpRequest) -> Result<T>
where
    T: DeserializeOwned,
    R: Transport + ?Sized,
{
    let response = send(transport, request)?;
    parse_json(&response)
}

/// Send `request` once and check only the status. For endpoints that answer
/// with an empty body.
pub fn execute_no_content<R>(transport: &R, request: &HttpRequest) -> Result<()>
where
    R: Transport + ?Sized,
{
    send(transport, request).map(|_| ())
}

fn send<R>(transport: &R, request: &HttpRequest) -> Result<HttpResponse>
where
    R: Transport + ?Sized,
{
    let response = transport.execute(request)?;
    tracing::debug!(
        method = %request.method,
        url = %request.url(),
        status = response.status,
        "request completed"
    );
    check_status(response)
}

/// Map a status outside the success range to `ApiError::HttpError`.
fn check_status(response: HttpResponse) -> Result<HttpResponse> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body,
    })
}

fn parse_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DecodeError(e.to_string()))
}
