//! Gallery routes end to end, against in-memory adapters.

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing::Level;

mod common;

use common::{InMemoryImageSource, ScriptedStorage, TestApp, BASE_URL};

async fn call(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_random_images_returns_a_distinct_page() {
    let app = TestApp::with_images(20);

    let (status, body) = call(&app, get("/lgtm-images")).await;

    assert_eq!(status, StatusCode::OK);
    let images = body["lgtmImages"].as_array().unwrap();
    assert_eq!(images.len(), 9);

    let mut ids: Vec<_> = images.iter().map(|i| i["id"].as_str().unwrap().to_string()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 9);

    let first = &images[0];
    assert_eq!(
        first["url"].as_str().unwrap(),
        format!("https://{}/2024/01/01/00/{}.webp", BASE_URL, first["id"].as_str().unwrap())
    );
    // One id listing, one batch lookup.
    assert_eq!(app.source.call_count(), 2);
}

#[tokio::test]
async fn test_random_images_with_too_few_stored() {
    let app = TestApp::with_images(5);

    let (status, body) = call(&app, get("/lgtm-images")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"code": 404, "message": "Not Found"}));
    // The batch lookup is never issued.
    assert_eq!(app.source.call_count(), 1);
    assert_eq!(app.reporter.count(), 0);
}

#[tokio::test]
async fn test_recently_created_newest_first() {
    let app = TestApp::with_images(12);

    let (status, body) = call(&app, get("/lgtm-images/recently-created")).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = body["lgtmImages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["12", "11", "10", "9", "8", "7", "6", "5", "4"]);
}

#[tokio::test]
async fn test_catalog_failure_is_reported_and_hidden() {
    let app = TestApp::new(
        InMemoryImageSource::new(common::records(9)).failing("Access denied for user 'root'"),
        ScriptedStorage::new(),
    );

    let (status, body) = call(&app, get("/lgtm-images/recently-created")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"code": 500, "message": "Internal Server Error"}));

    let reports = app.reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].0, "FindRecentlyCreated");
    assert!(reports[0].1.contains("Access denied"));

    let errors = app.logger.at(Level::ERROR);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field("operation"), Some("FindRecentlyCreated"));
}

#[tokio::test]
async fn test_create_image_uploads_and_returns_webp_url() {
    let app = TestApp::with_images(0);

    let (status, body) = call(
        &app,
        post_json("/lgtm-images", json!({"image": "iVBORw0KGgo=", "imageExtension": ".png"})),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    let url = body["imageUrl"].as_str().unwrap();
    assert!(url.starts_with(&format!("https://{BASE_URL}/")));
    assert!(url.ends_with(".webp"));

    let stored = app.storage.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].bucket, "test-bucket");
    assert_eq!(stored[0].content_type, "image/png");
    assert_eq!(stored[0].size, 8);
    assert!(stored[0].key.ends_with(".png"));

    // Key and URL share the JST hour prefix and the generated name.
    let key_stem = stored[0].key.trim_end_matches(".png");
    assert!(url.ends_with(&format!("{key_stem}.webp")));
}

#[tokio::test]
async fn test_create_image_rejects_bad_input() {
    let app = TestApp::with_images(0);

    let (status, body) = call(
        &app,
        post_json("/lgtm-images", json!({"image": "R0lGODlh", "imageExtension": ".gif"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({"code": 422, "message": "Unprocessable Entity"}));

    let (status, _) = call(
        &app,
        post_json("/lgtm-images", json!({"image": "***", "imageExtension": ".jpg"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = call(&app, post_json("/lgtm-images", json!({"imageExtension": ".jpg"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    assert!(app.storage.stored().is_empty());
}

#[tokio::test]
async fn test_upload_failure_is_reported_once() {
    let app = TestApp::new(InMemoryImageSource::default(), ScriptedStorage::new().failing("slow down"));

    let (status, _) = call(
        &app,
        post_json("/lgtm-images", json!({"image": "/9j/4AAQ", "imageExtension": ".jpeg"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let reports = app.reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].0, "Upload");
    assert!(reports[0].1.contains("extension=.jpeg"));
}

#[tokio::test]
async fn test_live_server_health_check_and_shutdown() {
    let app = TestApp::with_images(9);
    let (addr, shutdown, handle) = app.spawn().await;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{addr}/health-checks"))
        .header("x-request-id", "live-1")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("live-1")
    );
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"statusCode": 200}));

    let body: Value = client
        .get(format!("http://{addr}/lgtm-images"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["lgtmImages"].as_array().unwrap().len(), 9);

    drop(client);
    // The server is the only listener.
    assert_eq!(shutdown.trigger(), 1);
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
}
