mod common;

use common::{client_for, dead_base, Route, StubServer};
use knowledge_copilot::api::ApiError;
use serde_json::{json, Value};

#[tokio::test]
async fn success_returns_body_unchanged() {
    let body = json!({ "status": "ok", "nested": { "n": [1, 2, 3] }, "none": null });
    let server = StubServer::start(vec![Route::json("GET", "/echo", body.clone())]).await;
    let client = server.client();

    let value: Value = client
        .fetch_json(client.http().get(format!("{}/echo", server.base)))
        .await
        .unwrap();

    assert_eq!(value, body);
}

#[tokio::test]
async fn failure_status_becomes_status_error() {
    let cases = [
        (500, "500 Internal Server Error"),
        (404, "404 Not Found"),
        (503, "503 Service Unavailable"),
        (400, "400 Bad Request"),
    ];
    let routes = cases
        .iter()
        .map(|(code, _)| Route::status("GET", &format!("/fail/{}", code), *code))
        .collect();
    let server = StubServer::start(routes).await;
    let client = server.client();

    for (code, message) in cases {
        let err = client
            .fetch_json::<Value>(client.http().get(format!("{}/fail/{}", server.base, code)))
            .await
            .unwrap_err();
        match err {
            ApiError::Status {
                status,
                message: got,
            } => {
                assert_eq!(status, code);
                assert_eq!(got, message);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn status_error_keeps_the_servers_reason_text() {
    let server = StubServer::start(vec![
        Route::status("GET", "/boom", 500).with_reason("Backend Exploded"),
        Route::status("GET", "/teapot", 418).with_reason("Short And Stout"),
    ])
    .await;
    let client = server.client();

    let err = client
        .fetch_json::<Value>(client.http().get(format!("{}/boom", server.base)))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "500 Backend Exploded");

    let err = client
        .fetch_json::<Value>(client.http().get(format!("{}/teapot", server.base)))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "418 Short And Stout");
}

#[tokio::test]
async fn transport_failure_keeps_reqwest_error() {
    let client = client_for(&dead_base().await);
    let err = client
        .fetch_json::<Value>(client.http().get(&client.endpoints().health))
        .await
        .unwrap_err();

    assert!(err.status().is_none());
    match err {
        ApiError::Network(inner) => assert!(inner.is_connect()),
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() {
    let mut route = Route::json("GET", "/garbage", json!(null));
    route.body = "<html>oops</html>".to_string();
    let server = StubServer::start(vec![route]).await;
    let client = server.client();

    let err = client
        .fetch_json::<Value>(client.http().get(format!("{}/garbage", server.base)))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn status_of_reports_status_without_failing() {
    let server = StubServer::start(vec![Route::status("GET", "/api/v1/health", 503)]).await;
    let client = server.client();

    let status = client.status_of(&client.endpoints().health).await.unwrap();
    assert_eq!(status.as_u16(), 503);
}

#[tokio::test]
async fn list_requests_carry_project_id() {
    let server = StubServer::start(common::default_routes()).await;
    let client = server.client();

    client.list_documents("team-a").await.unwrap();
    client.metrics("team-a").await.unwrap();

    let hits = server.hits();
    assert_eq!(hits.len(), 2);
    assert!(hits
        .iter()
        .all(|h| h.target.ends_with("?project_id=team-a")));
}
