//! Monitor API: conference recordings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{time_range_query, MONITOR_CURSOR, NO_UPPER_BOUND};
use crate::auth::BearerCredential;
use crate::client::{authorized, authorized_get, RestClient};
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::pagination::deserialize_cursor;
use crate::transport::Transport;

/// Query for the recordings list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRecordingsOptions {
    /// Start of the time range, epoch milliseconds.
    pub from: u64,
    /// End of the time range, epoch milliseconds.
    pub to: u64,
    /// Page size.
    pub max: u32,
    /// Cursor from a previous page's `next`.
    pub start: Option<String>,
}

impl Default for GetRecordingsOptions {
    fn default() -> Self {
        Self {
            from: 0,
            to: NO_UPPER_BOUND,
            max: 100,
            start: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceRef {
    pub conf_id: Uuid,
    #[serde(default)]
    pub conf_alias: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub conference: ConferenceRef,
    #[serde(default)]
    pub region: Option<String>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub start_time: u64,
    /// Milliseconds.
    #[serde(default)]
    pub duration: u64,
    /// Bytes.
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub url: Option<String>,
}

/// One page of the recordings list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordingsPage {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default, deserialize_with = "deserialize_cursor")]
    pub next: Option<String>,
    #[serde(default)]
    pub recordings: Vec<Recording>,
}

const RECORDINGS_PATH: &str = "/v1/monitor/recordings";

fn conference_recordings_path(conference_id: Uuid) -> String {
    format!("/v1/monitor/conferences/{conference_id}/recordings")
}

impl<T: Transport> RestClient<T> {
    pub fn build_get_recordings(
        &self,
        credential: &BearerCredential,
        options: &GetRecordingsOptions,
    ) -> HttpRequest {
        list_request(&self.config().communications_url, RECORDINGS_PATH, credential, options)
    }

    /// One page of recordings across all conferences.
    pub fn get_recordings(
        &self,
        credential: &BearerCredential,
        options: &GetRecordingsOptions,
    ) -> Result<RecordingsPage> {
        self.send(&self.build_get_recordings(credential, options))
    }

    /// Every recording in the time range, following `next` cursors.
    pub fn get_all_recordings(
        &self,
        credential: &BearerCredential,
        options: &GetRecordingsOptions,
    ) -> Result<Vec<Recording>> {
        let template = self.build_get_recordings(credential, options);
        self.collect(&template, "recordings", MONITOR_CURSOR)
    }

    pub fn build_get_conference_recordings(
        &self,
        credential: &BearerCredential,
        conference_id: Uuid,
        options: &GetRecordingsOptions,
    ) -> HttpRequest {
        list_request(
            &self.config().communications_url,
            conference_recordings_path(conference_id),
            credential,
            options,
        )
    }

    pub fn get_conference_recordings(
        &self,
        credential: &BearerCredential,
        conference_id: Uuid,
        options: &GetRecordingsOptions,
    ) -> Result<RecordingsPage> {
        self.send(&self.build_get_conference_recordings(credential, conference_id, options))
    }

    pub fn get_all_conference_recordings(
        &self,
        credential: &BearerCredential,
        conference_id: Uuid,
        options: &GetRecordingsOptions,
    ) -> Result<Vec<Recording>> {
        let template = self.build_get_conference_recordings(credential, conference_id, options);
        self.collect(&template, "recordings", MONITOR_CURSOR)
    }

    pub fn build_delete_recordings(&self, credential: &BearerCredential, from: u64, to: u64) -> HttpRequest {
        let mut request = authorized(
            HttpMethod::Delete,
            &self.config().communications_url,
            RECORDINGS_PATH,
            credential,
        );
        request.query = time_range_query(from, to);
        request
    }

    /// Delete every recording whose start falls within `from..to` (epoch ms).
    pub fn delete_recordings(&self, credential: &BearerCredential, from: u64, to: u64) -> Result<()> {
        self.send_no_content(&self.build_delete_recordings(credential, from, to))
    }
}

fn list_request(
    base_url: &str,
    path: impl Into<String>,
    credential: &BearerCredential,
    options: &GetRecordingsOptions,
) -> HttpRequest {
    let mut request = authorized_get(base_url, path, credential);
    request.query = time_range_query(options.from, options.to);
    request.query.push(("max".to_string(), options.max.to_string()));
    if let Some(start) = &options.start {
        request.query.push(("start".to_string(), start.clone()));
    }
    request
}
