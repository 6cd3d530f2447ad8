//! Monitor API: conference history.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{time_range_query, MONITOR_CURSOR, NO_UPPER_BOUND};
use crate::auth::BearerCredential;
use crate::client::{authorized_get, RestClient};
use crate::error::Result;
use crate::http::HttpRequest;
use crate::pagination::deserialize_cursor;
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConferencesOptions {
    pub from: u64,
    pub to: u64,
    pub max: u32,
    pub start: Option<String>,
    /// Only conferences whose alias matches.
    pub alias: Option<String>,
    /// Only conferences still in progress.
    pub active: bool,
}

impl Default for ListConferencesOptions {
    fn default() -> Self {
        Self {
            from: 0,
            to: NO_UPPER_BOUND,
            max: 100,
            start: None,
            alias: None,
            active: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Conference {
    pub conf_id: Uuid,
    #[serde(default)]
    pub alias: Option<String>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub start: u64,
    /// Epoch milliseconds, absent while the conference is live.
    #[serde(default)]
    pub end: Option<u64>,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub live: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConferencesPage {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default, deserialize_with = "deserialize_cursor")]
    pub next: Option<String>,
    #[serde(default)]
    pub conferences: Vec<Conference>,
}

impl<T: Transport> RestClient<T> {
    pub fn build_list_conferences(
        &self,
        credential: &BearerCredential,
        options: &ListConferencesOptions,
    ) -> HttpRequest {
        let mut request = authorized_get(
            &self.config().communications_url,
            "/v1/monitor/conferences",
            credential,
        );
        request.query = time_range_query(options.from, options.to);
        request.query.push(("max".to_string(), options.max.to_string()));
        if let Some(start) = &options.start {
            request.query.push(("start".to_string(), start.clone()));
        }
        if let Some(alias) = &options.alias {
            request.query.push(("alias".to_string(), alias.clone()));
        }
        if options.active {
            request.query.push(("active".to_string(), "true".to_string()));
        }
        request
    }

    pub fn list_conferences(
        &self,
        credential: &BearerCredential,
        options: &ListConferencesOptions,
    ) -> Result<ConferencesPage> {
        self.send(&self.build_list_conferences(credential, options))
    }

    pub fn list_all_conferences(
        &self,
        credential: &BearerCredential,
        options: &ListConferencesOptions,
    ) -> Result<Vec<Conference>> {
        let template = self.build_list_conferences(credential, options);
        self.collect(&template, "conferences", MONITOR_CURSOR)
    }
}
