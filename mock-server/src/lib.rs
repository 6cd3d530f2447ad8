use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Form, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const APP_KEY: &str = "mock-app-key";
pub const APP_SECRET: &str = "mock-app-secret";
pub const ACCESS_TOKEN: &str = "mock-access-token";
pub const PUBLISH_TOKEN: &str = "mock-publish-token";
pub const STREAM_ACCOUNT_ID: &str = "mockAcct";
pub const DEFAULT_TOKEN_TTL: u64 = 1800;
pub const JOBS_PAGE_SIZE: usize = 2;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceRef {
    pub conf_id: Uuid,
    pub conf_alias: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub conference: ConferenceRef,
    pub region: String,
    pub start_time: u64,
    pub duration: u64,
    pub size: u64,
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Conference {
    pub conf_id: Uuid,
    pub alias: String,
    pub start: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u64>,
    pub duration: u64,
    pub live: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    pub job_id: Uuid,
    pub path: String,
    pub status: String,
    pub progress: u8,
}

/// Everything the mock serves. Lists are returned in stored order.
#[derive(Clone, Debug, Default)]
pub struct MockData {
    pub recordings: Vec<Recording>,
    pub conferences: Vec<Conference>,
    pub jobs: Vec<Job>,
}

impl MockData {
    /// Three conferences, five recordings, five media jobs. Ids are fixed so
    /// tests can refer to them.
    pub fn seeded() -> Self {
        let conferences = vec![
            conference(1, "standup", 1_000, Some(61_000)),
            conference(2, "retro", 100_000, Some(400_000)),
            conference(3, "all-hands", 500_000, None),
        ];
        let recordings = vec![
            recording(&conferences[0], 1_000, 60_000),
            recording(&conferences[1], 100_000, 150_000),
            recording(&conferences[1], 250_000, 150_000),
            recording(&conferences[2], 500_000, 30_000),
            recording(&conferences[2], 530_000, 30_000),
        ];
        let jobs = vec![
            job(1, "/media/enhance", "Success", 100),
            job(2, "/media/analyze", "Success", 100),
            job(3, "/media/transcode", "Running", 45),
            job(4, "/media/enhance", "Failed", 10),
            job(5, "/media/analyze", "Pending", 0),
        ];
        Self {
            recordings,
            conferences,
            jobs,
        }
    }
}

pub fn conference_id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn job_id(n: u128) -> Uuid {
    Uuid::from_u128(0x1000 + n)
}

fn conference(n: u128, alias: &str, start: u64, end: Option<u64>) -> Conference {
    Conference {
        conf_id: conference_id(n),
        alias: alias.to_string(),
        start,
        end,
        duration: end.map(|e| e - start).unwrap_or_default(),
        live: end.is_none(),
    }
}

fn recording(conf: &Conference, start_time: u64, duration: u64) -> Recording {
    Recording {
        conference: ConferenceRef {
            conf_id: conf.conf_id,
            conf_alias: conf.alias.clone(),
        },
        region: "us".to_string(),
        start_time,
        duration,
        size: duration * 16,
        url: format!("https://recordings.example/{}/{start_time}.mp4", conf.conf_id),
    }
}

fn job(n: u128, path: &str, status: &str, progress: u8) -> Job {
    Job {
        job_id: job_id(n),
        path: path.to_string(),
        status: status.to_string(),
        progress,
    }
}

pub type Db = Arc<RwLock<MockData>>;

type Failure = (StatusCode, Json<Value>);
type Reply<T> = Result<Json<T>, Failure>;

pub fn app() -> Router {
    app_with(MockData::seeded())
}

pub fn app_with(data: MockData) -> Router {
    let db: Db = Arc::new(RwLock::new(data));
    Router::new()
        .route("/v1/auth/token", post(issue_token))
        .route("/v1/monitor/recordings", get(list_recordings).delete(delete_recordings))
        .route("/v1/monitor/conferences", get(list_conferences))
        .route("/v1/monitor/conferences/{id}/recordings", get(list_conference_recordings))
        .route("/media/jobs", get(list_jobs))
        .route("/api/director/publish", post(publish))
        .route("/api/director/subscribe", post(subscribe))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn fail(status: StatusCode, message: &str) -> Failure {
    (status, Json(json!({"status": "fail", "data": {"message": message}})))
}

fn require_bearer(headers: &HeaderMap, expected: &str) -> Result<(), Failure> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    match token {
        Some(t) if t == expected => Ok(()),
        _ => Err(fail(StatusCode::UNAUTHORIZED, "Unauthorized")),
    }
}

/// Offset-based cursor: `start` is the index of the first item on the page.
fn paginate<T: Clone>(items: &[T], start: Option<&str>, max: usize) -> Result<(Vec<T>, Option<String>), Failure> {
    let offset = match start {
        None => 0,
        Some(s) => s
            .parse::<usize>()
            .map_err(|_| fail(StatusCode::BAD_REQUEST, "invalid cursor"))?,
    };
    let end = offset.saturating_add(max.max(1)).min(items.len());
    let page = items.get(offset..end).map(<[T]>::to_vec).unwrap_or_default();
    let next = (end < items.len()).then(|| end.to_string());
    Ok((page, next))
}

// --- auth ---

#[derive(Deserialize)]
pub struct TokenForm {
    pub grant_type: String,
    pub expires_in: Option<u64>,
}

async fn issue_token(headers: HeaderMap, Form(form): Form<TokenForm>) -> Reply<Value> {
    let expected = format!("Basic {}", STANDARD.encode(format!("{APP_KEY}:{APP_SECRET}")));
    let presented = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if presented != Some(expected.as_str()) {
        return Err(fail(StatusCode::UNAUTHORIZED, "invalid client credentials"));
    }
    if form.grant_type != "client_credentials" {
        return Err(fail(StatusCode::BAD_REQUEST, "unsupported grant_type"));
    }
    Ok(Json(json!({
        "token_type": "Bearer",
        "access_token": ACCESS_TOKEN,
        "expires_in": form.expires_in.unwrap_or(DEFAULT_TOKEN_TTL),
    })))
}

// --- monitor ---

#[derive(Deserialize)]
pub struct MonitorQuery {
    pub from: Option<u64>,
    pub to: Option<u64>,
    pub max: Option<usize>,
    pub start: Option<String>,
    pub alias: Option<String>,
    pub active: Option<bool>,
}

impl MonitorQuery {
    fn in_range(&self, ts: u64) -> bool {
        ts >= self.from.unwrap_or(0) && ts <= self.to.unwrap_or(u64::MAX)
    }

    fn max(&self) -> usize {
        self.max.unwrap_or(100)
    }
}

fn recordings_page(recordings: Vec<Recording>, query: &MonitorQuery) -> Reply<Value> {
    let (page, next) = paginate(&recordings, query.start.as_deref(), query.max())?;
    Ok(Json(json!({"first": "0", "next": next, "recordings": page})))
}

async fn list_recordings(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<MonitorQuery>,
) -> Reply<Value> {
    require_bearer(&headers, ACCESS_TOKEN)?;
    let data = db.read().await;
    let matching = data
        .recordings
        .iter()
        .filter(|r| query.in_range(r.start_time))
        .cloned()
        .collect();
    recordings_page(matching, &query)
}

async fn list_conference_recordings(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Query(query): Query<MonitorQuery>,
) -> Reply<Value> {
    require_bearer(&headers, ACCESS_TOKEN)?;
    let data = db.read().await;
    if !data.conferences.iter().any(|c| c.conf_id == id) {
        return Err(fail(StatusCode::NOT_FOUND, "conference not found"));
    }
    let matching = data
        .recordings
        .iter()
        .filter(|r| r.conference.conf_id == id && query.in_range(r.start_time))
        .cloned()
        .collect();
    recordings_page(matching, &query)
}

async fn delete_recordings(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<MonitorQuery>,
) -> Result<StatusCode, Failure> {
    require_bearer(&headers, ACCESS_TOKEN)?;
    db.write().await.recordings.retain(|r| !query.in_range(r.start_time));
    Ok(StatusCode::NO_CONTENT)
}

async fn list_conferences(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<MonitorQuery>,
) -> Reply<Value> {
    require_bearer(&headers, ACCESS_TOKEN)?;
    let data = db.read().await;
    let matching: Vec<Conference> = data
        .conferences
        .iter()
        .filter(|c| query.in_range(c.start))
        .filter(|c| query.alias.as_ref().map_or(true, |a| &c.alias == a))
        .filter(|c| !query.active.unwrap_or(false) || c.live)
        .cloned()
        .collect();
    let (page, next) = paginate(&matching, query.start.as_deref(), query.max())?;
    Ok(Json(json!({"first": "0", "next": next, "conferences": page})))
}

// --- media ---

#[derive(Deserialize)]
pub struct JobsQuery {
    pub status: Option<String>,
    pub next_token: Option<String>,
}

async fn list_jobs(State(db): State<Db>, headers: HeaderMap, Query(query): Query<JobsQuery>) -> Reply<Value> {
    require_bearer(&headers, ACCESS_TOKEN)?;
    let data = db.read().await;
    let matching: Vec<Job> = data
        .jobs
        .iter()
        .filter(|j| query.status.as_ref().map_or(true, |s| &j.status == s))
        .cloned()
        .collect();
    let (page, next) = paginate(&matching, query.next_token.as_deref(), JOBS_PAGE_SIZE)?;
    let mut body = json!({"jobs": page});
    if let Some(token) = next {
        body["next_token"] = Value::String(token);
    }
    Ok(Json(body))
}

// --- streaming director ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishInput {
    pub stream_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeInput {
    pub stream_account_id: String,
    pub stream_name: String,
}

fn director_data(stream_name: &str) -> Value {
    json!({
        "status": "success",
        "data": {
            "urls": [format!("wss://node.mock/ws/{stream_name}")],
            "jwt": Uuid::new_v4().to_string(),
            "streamAccountId": STREAM_ACCOUNT_ID,
        }
    })
}

async fn publish(headers: HeaderMap, Json(input): Json<PublishInput>) -> Reply<Value> {
    require_bearer(&headers, PUBLISH_TOKEN)?;
    if input.stream_name.is_empty() {
        return Err(fail(StatusCode::BAD_REQUEST, "streamName required"));
    }
    Ok(Json(director_data(&input.stream_name)))
}

async fn subscribe(Json(input): Json<SubscribeInput>) -> Reply<Value> {
    if input.stream_account_id != STREAM_ACCOUNT_ID {
        return Err(fail(StatusCode::NOT_FOUND, "stream account not found"));
    }
    Ok(Json(director_data(&input.stream_name)))
}
