use axum::http::{self, Request, StatusCode};
use base64::{engine::general_purpose::STANDARD, Engine};
use http_body_util::BodyExt;
use mock_server::{app, conference_id, Recording, ACCESS_TOKEN, APP_KEY, APP_SECRET, PUBLISH_TOKEN, STREAM_ACCOUNT_ID};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn authed(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {ACCESS_TOKEN}"))
        .body(String::new())
        .unwrap()
}

fn json_request(uri: &str, bearer: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(body.to_string()).unwrap()
}

fn token_request(key: &str, secret: &str, form: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/v1/auth/token")
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(
            http::header::AUTHORIZATION,
            format!("Basic {}", STANDARD.encode(format!("{key}:{secret}"))),
        )
        .body(form.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn token_issued_for_valid_credentials() {
    let resp = app()
        .oneshot(token_request(APP_KEY, APP_SECRET, "grant_type=client_credentials&expires_in=60"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["access_token"], ACCESS_TOKEN);
    assert_eq!(body["expires_in"], 60);
}

#[tokio::test]
async fn token_rejected_for_wrong_secret() {
    let resp = app()
        .oneshot(token_request(APP_KEY, "nope", "grant_type=client_credentials"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_rejects_other_grant_types() {
    let resp = app()
        .oneshot(token_request(APP_KEY, APP_SECRET, "grant_type=password"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- recordings ---

#[tokio::test]
async fn recordings_require_bearer() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/v1/monitor/recordings")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn recordings_first_page_has_cursor() {
    let resp = app()
        .oneshot(authed("GET", "/v1/monitor/recordings?from=0&to=9999999999999&max=2"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["recordings"].as_array().unwrap().len(), 2);
    assert_eq!(body["next"], "2");
}

#[tokio::test]
async fn recordings_last_page_has_null_cursor() {
    let resp = app()
        .oneshot(authed("GET", "/v1/monitor/recordings?max=2&start=4"))
        .await
        .unwrap();

    let body: Value = body_json(resp).await;
    assert_eq!(body["recordings"].as_array().unwrap().len(), 1);
    assert!(body["next"].is_null());
}

#[tokio::test]
async fn recordings_bad_cursor_returns_400() {
    let resp = app()
        .oneshot(authed("GET", "/v1/monitor/recordings?start=zzz"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn conference_recordings_filter_by_conference() {
    let id = conference_id(2);
    let resp = app()
        .oneshot(authed("GET", &format!("/v1/monitor/conferences/{id}/recordings")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    let recordings: Vec<Recording> = serde_json::from_value(body["recordings"].clone()).unwrap();
    assert_eq!(recordings.len(), 2);
    assert!(recordings.iter().all(|r| r.conference.conf_id == id));
}

#[tokio::test]
async fn conference_recordings_unknown_conference_returns_404() {
    let resp = app()
        .oneshot(authed(
            "GET",
            "/v1/monitor/conferences/00000000-0000-0000-0000-0000000000ff/recordings",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- conferences ---

#[tokio::test]
async fn conferences_active_filter() {
    let resp = app()
        .oneshot(authed("GET", "/v1/monitor/conferences?active=true"))
        .await
        .unwrap();

    let body: Value = body_json(resp).await;
    let conferences = body["conferences"].as_array().unwrap();
    assert_eq!(conferences.len(), 1);
    assert_eq!(conferences[0]["alias"], "all-hands");
}

// --- media jobs ---

#[tokio::test]
async fn jobs_page_with_next_token() {
    let resp = app().oneshot(authed("GET", "/media/jobs")).await.unwrap();

    let body: Value = body_json(resp).await;
    assert_eq!(body["jobs"].as_array().unwrap().len(), 2);
    assert_eq!(body["next_token"], "2");
}

#[tokio::test]
async fn jobs_last_page_omits_next_token() {
    let resp = app()
        .oneshot(authed("GET", "/media/jobs?status=Success"))
        .await
        .unwrap();

    let body: Value = body_json(resp).await;
    assert_eq!(body["jobs"].as_array().unwrap().len(), 2);
    assert!(body.get("next_token").is_none());
}

// --- director ---

#[tokio::test]
async fn publish_returns_wrapped_data() {
    let resp = app()
        .oneshot(json_request(
            "/api/director/publish",
            Some(PUBLISH_TOKEN),
            r#"{"streamName":"cam1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["streamAccountId"], STREAM_ACCOUNT_ID);
    assert_eq!(body["data"]["urls"][0], "wss://node.mock/ws/cam1");
}

#[tokio::test]
async fn publish_rejects_wrong_token() {
    let resp = app()
        .oneshot(json_request("/api/director/publish", Some("wrong"), r#"{"streamName":"cam1"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn subscribe_unknown_account_returns_404() {
    let resp = app()
        .oneshot(json_request(
            "/api/director/subscribe",
            None,
            r#"{"streamAccountId":"other","streamName":"cam1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete then list ---

#[tokio::test]
async fn delete_recordings_in_range() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("DELETE", "/v1/monitor/recordings?from=0&to=200000"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = body_bytes(resp).await;
    assert!(body.is_empty());

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed("GET", "/v1/monitor/recordings"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    let recordings: Vec<Recording> = serde_json::from_value(body["recordings"].clone()).unwrap();
    assert_eq!(recordings.len(), 3);
    assert!(recordings.iter().all(|r| r.start_time > 200_000));
}
