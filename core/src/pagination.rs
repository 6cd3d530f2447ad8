//! Paginated collector: flattens a cursor-paginated list endpoint into one
//! ordered `Vec`.
//!
//! # Design
//! Each page's request depends on the previous page's cursor, so pages are
//! fetched strictly one after another. The accumulator lives only for the
//! duration of one `collect_all` call; an error on any page drops it, so a
//! caller never sees a partial collection.
//!
//! Where the cursor lives differs per endpoint (`next` → `start` for the
//! monitor API, `next_token` → `next_token` for media jobs), which is why it
//! is described by a `PageCursor` rather than hard-coded.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::executor::execute;
use crate::http::HttpRequest;
use crate::transport::Transport;

/// Where a list endpoint puts its continuation cursor, and which query
/// parameter carries it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// Field of the response envelope holding the cursor.
    pub response_field: &'static str,
    /// Query parameter the cursor is substituted into for the next page.
    pub query_param: &'static str,
}

impl PageCursor {
    pub const fn new(response_field: &'static str, query_param: &'static str) -> Self {
        Self {
            response_field,
            query_param,
        }
    }
}

/// Tuning for a single collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectOptions {
    /// Upper bound on pages fetched. `None` follows cursors for as long as the
    /// server returns them. The cap is checked before each request, so
    /// `Some(0)` fails without touching the network.
    pub max_pages: Option<usize>,
}

/// Fetch every page starting from `template` and return the concatenation of
/// each page's `items_field` array.
///
/// A page without `items_field` (or with it set to `null`) contributes
/// nothing and ends the collection. A cursor that is absent, `null`, or empty
/// also ends it.
pub fn collect_all<T, R>(
    transport: &R,
    template: &HttpRequest,
    items_field: &str,
    cursor: PageCursor,
    options: CollectOptions,
) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Transport + ?Sized,
{
    let mut items = Vec::new();
    let mut request = template.clone();
    let mut pages = 0usize;

    loop {
        if let Some(max) = options.max_pages {
            if pages >= max {
                tracing::warn!(pages, "server still returned a cursor at the page limit");
                return Err(ApiError::PageLimitExceeded { pages });
            }
        }
        let envelope: Value = execute(transport, &request)?;
        pages += 1;

        let Some(page) = page_items::<T>(&envelope, items_field)? else {
            tracing::debug!(page = pages, field = items_field, "page has no items field, stopping");
            break;
        };
        let count = page.len();
        items.extend(page);

        let next = next_cursor(&envelope, cursor.response_field);
        tracing::debug!(page = pages, items = count, has_next = next.is_some(), "collected page");

        let Some(next) = next else {
            break;
        };
        request = template.with_query(cursor.query_param, next);
    }

    Ok(items)
}

fn page_items<T: DeserializeOwned>(envelope: &Value, field: &str) -> Result<Option<Vec<T>>> {
    match envelope.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(values)) => values
            .iter()
            .map(|v| T::deserialize(v).map_err(|e| ApiError::DecodeError(format!("{field}: {e}"))))
            .collect::<Result<Vec<T>>>()
            .map(Some),
        Some(other) => Err(ApiError::DecodeError(format!(
            "expected `{field}` to be an array, found {other}"
        ))),
    }
}

fn next_cursor(envelope: &Value, field: &str) -> Option<String> {
    envelope.get(field).and_then(cursor_value)
}

fn cursor_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `deserialize_with` helper for the cursor field of typed page structs.
///
/// Reads the cursor exactly as `collect_all` does: numbers become their
/// decimal string, and an empty string reads as no cursor.
pub(crate) fn deserialize_cursor<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v @ (Value::String(_) | Value::Number(_))) => Ok(cursor_value(&v)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number cursor, found {other}"
        ))),
    }
}
