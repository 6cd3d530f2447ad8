//! Blocking client core for the vendor's communications, media, and
//! streaming REST APIs.
//!
//! # Overview
//! Endpoint wrappers build `HttpRequest` values, a `Transport` performs the
//! round trip, and the executor turns the response into a typed value or an
//! `ApiError`. List endpoints that page with a cursor also get a `*_all`
//! variant backed by the paginated collector, which follows cursors until the
//! server stops returning one and returns every item in order.
//!
//! # Design
//! - `RestClient` is stateless apart from its config and transport.
//! - Every endpoint has a pure `build_*` method, so request shape is testable
//!   without a server.
//! - `UreqTransport` is the default transport; anything implementing
//!   `Transport`, including a closure, can replace it.
//! - Tokens are supplied by the caller and never refreshed here.

pub mod auth;
pub mod client;
pub mod communications;
pub mod config;
pub mod error;
pub mod executor;
pub mod http;
pub mod media;
pub mod pagination;
pub mod streaming;
pub mod transport;

pub use auth::{AppCredentials, BearerCredential, JwtToken};
pub use client::RestClient;
pub use communications::conferences::{Conference, ConferencesPage, ListConferencesOptions};
pub use communications::recordings::{ConferenceRef, GetRecordingsOptions, Recording, RecordingsPage};
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use media::jobs::{Job, JobStatus, JobsPage, ListJobsOptions};
pub use pagination::{collect_all, CollectOptions, PageCursor};
pub use streaming::director::{PublishResponse, SubscribeResponse};
pub use transport::{Transport, UreqTransport};
