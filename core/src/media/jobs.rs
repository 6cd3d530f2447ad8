//! Media job listing.
//!
//! Unlike the monitor API, this endpoint pages with `next_token` on both
//! sides: the envelope field and the query parameter share the name.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::BearerCredential;
use crate::client::{authorized_get, RestClient};
use crate::error::Result;
use crate::http::HttpRequest;
use crate::pagination::{deserialize_cursor, PageCursor};
use crate::transport::Transport;

const JOBS_CURSOR: PageCursor = PageCursor::new("next_token", "next_token");

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Running,
    Success,
    Failed,
    InternalError,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::Running => "Running",
            JobStatus::Success => "Success",
            JobStatus::Failed => "Failed",
            JobStatus::InternalError => "InternalError",
            JobStatus::Cancelled => "Cancelled",
            JobStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    pub job_id: Uuid,
    /// API path that created the job, e.g. `/media/enhance`.
    #[serde(default)]
    pub path: Option<String>,
    pub status: JobStatus,
    /// Percent complete.
    #[serde(default)]
    pub progress: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListJobsOptions {
    pub status: Option<JobStatus>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobsPage {
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default, deserialize_with = "deserialize_cursor")]
    pub next_token: Option<String>,
}

impl<T: Transport> RestClient<T> {
    pub fn build_list_jobs(&self, credential: &BearerCredential, options: &ListJobsOptions) -> HttpRequest {
        let mut request = authorized_get(&self.config().media_url, "/media/jobs", credential);
        if let Some(status) = options.status {
            request.query.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(token) = &options.next_token {
            request.query.push(("next_token".to_string(), token.clone()));
        }
        request
    }

    pub fn list_jobs(&self, credential: &BearerCredential, options: &ListJobsOptions) -> Result<JobsPage> {
        self.send(&self.build_list_jobs(credential, options))
    }

    pub fn list_all_jobs(&self, credential: &BearerCredential, options: &ListJobsOptions) -> Result<Vec<Job>> {
        let template = self.build_list_jobs(credential, options);
        self.collect(&template, "jobs", JOBS_CURSOR)
    }
}
