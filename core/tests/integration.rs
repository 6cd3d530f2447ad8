//! End-to-end run against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every endpoint
//! wrapper over real HTTP through `UreqTransport`. Validates that request
//! building, pagination, and response decoding agree with the server.

use std::time::Duration;

use media_rest_core::{
    ApiError, AppCredentials, BearerCredential, ClientConfig, GetRecordingsOptions, HttpMethod, HttpRequest,
    JobStatus, ListConferencesOptions, ListJobsOptions, RestClient, Transport, UreqTransport,
};
use mock_server::{conference_id, job_id, APP_KEY, APP_SECRET, PUBLISH_TOKEN, STREAM_ACCOUNT_ID};

/// Start a mock server on a random port and return its base URL. Each call
/// gets its own server so tests that delete data do not interfere.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn client(base_url: &str) -> RestClient {
    let mut config = ClientConfig::with_base_url(base_url);
    config.timeout = Duration::from_secs(5);
    RestClient::new(config)
}

fn credential(client: &RestClient) -> BearerCredential {
    let app = AppCredentials::new(APP_KEY, APP_SECRET);
    client.get_api_token(&app, Some(600)).unwrap().credential()
}

#[test]
fn token_exchange() {
    let client = client(&start_server());

    let token = client
        .get_api_token(&AppCredentials::new(APP_KEY, APP_SECRET), Some(600))
        .unwrap();
    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.expires_in, Some(600));

    let err = client
        .get_api_token(&AppCredentials::new(APP_KEY, "wrong"), None)
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[test]
fn recordings_lifecycle() {
    let client = client(&start_server());
    let cred = credential(&client);

    // Step 1: one page of two.
    let small_pages = GetRecordingsOptions {
        max: 2,
        ..Default::default()
    };
    let page = client.get_recordings(&cred, &small_pages).unwrap();
    assert_eq!(page.recordings.len(), 2);
    assert_eq!(page.next.as_deref(), Some("2"));

    // Step 2: collect everything across three pages.
    let all = client.get_all_recordings(&cred, &small_pages).unwrap();
    let starts: Vec<u64> = all.iter().map(|r| r.start_time).collect();
    assert_eq!(starts, vec![1_000, 100_000, 250_000, 500_000, 530_000]);

    // Step 3: collection is repeatable.
    assert_eq!(client.get_all_recordings(&cred, &small_pages).unwrap(), all);

    // Step 4: same result with the default page size.
    assert_eq!(
        client.get_all_recordings(&cred, &GetRecordingsOptions::default()).unwrap(),
        all
    );

    // Step 5: per-conference listing.
    let retro = client
        .get_all_conference_recordings(&cred, conference_id(2), &small_pages)
        .unwrap();
    assert_eq!(retro.len(), 2);
    assert!(retro.iter().all(|r| r.conference.conf_alias.as_deref() == Some("retro")));

    // Step 6: delete the first two and list again.
    client.delete_recordings(&cred, 0, 200_000).unwrap();
    let remaining = client.get_all_recordings(&cred, &small_pages).unwrap();
    assert_eq!(remaining.len(), 3);
    assert_eq!(remaining[0].start_time, 250_000);
}

#[test]
fn unknown_conference_is_http_error() {
    let client = client(&start_server());
    let cred = credential(&client);

    let err = client
        .get_all_conference_recordings(&cred, conference_id(99), &GetRecordingsOptions::default())
        .unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 404, .. }));
}

#[test]
fn bad_token_is_rejected() {
    let client = client(&start_server());
    let err = client
        .get_all_recordings(&BearerCredential::bearer("stale"), &GetRecordingsOptions::default())
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[test]
fn conferences_across_pages() {
    let client = client(&start_server());
    let cred = credential(&client);

    let options = ListConferencesOptions {
        max: 1,
        ..Default::default()
    };
    let all = client.list_all_conferences(&cred, &options).unwrap();
    let ids: Vec<_> = all.iter().map(|c| c.conf_id).collect();
    assert_eq!(ids, vec![conference_id(1), conference_id(2), conference_id(3)]);

    let live = client
        .list_all_conferences(
            &cred,
            &ListConferencesOptions {
                active: true,
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(live.len(), 1);
    assert!(live[0].live);
}

#[test]
fn media_jobs_follow_next_token() {
    let client = client(&start_server());
    let cred = credential(&client);

    let first = client.list_jobs(&cred, &ListJobsOptions::default()).unwrap();
    assert_eq!(first.jobs.len(), 2);
    assert_eq!(first.next_token.as_deref(), Some("2"));

    let all = client.list_all_jobs(&cred, &ListJobsOptions::default()).unwrap();
    let ids: Vec<_> = all.iter().map(|j| j.job_id).collect();
    assert_eq!(ids, (1..=5).map(job_id).collect::<Vec<_>>());
    assert_eq!(all[2].status, JobStatus::Running);

    let failed = client
        .list_all_jobs(
            &cred,
            &ListJobsOptions {
                status: Some(JobStatus::Failed),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].job_id, job_id(4));
}

#[test]
fn page_limit_stops_collection() {
    let client = client(&start_server()).with_max_pages(2);
    let cred = credential(&client);

    let options = GetRecordingsOptions {
        max: 1,
        ..Default::default()
    };
    let err = client.get_all_recordings(&cred, &options).unwrap_err();
    assert!(matches!(err, ApiError::PageLimitExceeded { pages: 2 }));
}

#[test]
fn director_publish_and_subscribe() {
    let client = client(&start_server());

    let published = client.publish(PUBLISH_TOKEN, "cam1").unwrap();
    assert_eq!(published.stream_account_id, STREAM_ACCOUNT_ID);
    assert_eq!(published.urls, vec!["wss://node.mock/ws/cam1"]);
    assert!(!published.jwt.is_empty());

    let viewer = client
        .subscribe(&published.stream_account_id, "cam1", None)
        .unwrap();
    assert_eq!(viewer.urls, published.urls);

    let err = client.publish("not-a-token", "cam1").unwrap_err();
    assert_eq!(err.status(), Some(401));

    let err = client.subscribe("someone-else", "cam1", None).unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[test]
fn raw_transport_returns_error_statuses_as_data() {
    let base = start_server();
    let transport = UreqTransport::new(Duration::from_secs(5));
    let req = HttpRequest::new(HttpMethod::Get, &base, "/v1/monitor/recordings");
    let resp = transport.execute(&req).unwrap();
    assert_eq!(resp.status, 401);
    assert!(resp.body.contains("Unauthorized"));
}
