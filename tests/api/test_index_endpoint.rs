// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Upload page and static asset tests

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use center_finder::api::{create_app, AppState};
use center_finder::config::DEFAULT_MAX_BODY_BYTES;
use center_finder::vision::ModelId;
use tower::util::ServiceExt;

use crate::common::{cache_with, FixedLoader};

fn app() -> (tempfile::TempDir, Router) {
    let (dir, cache) = cache_with(&[], FixedLoader::new([64.0, 64.0]));
    (dir, create_app(AppState::from_cache(cache), DEFAULT_MAX_BODY_BYTES))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_index_serves_upload_page() {
    let (_dir, app) = app();
    let (status, content_type, page) = get(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(page.contains("id=\"uploadArea\""));
    assert!(page.contains("id=\"modelSelect\""));
    for model in ModelId::ALL {
        assert!(page.contains(model.as_str()), "missing {}", model);
    }
}

#[tokio::test]
async fn test_index_needs_no_models() {
    // Page renders even when the model directory is empty
    let (_dir, app) = app();
    let (status, _, _) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_script_is_served() {
    let (_dir, app) = app();
    let (status, content_type, script) = get(app, "/static/js/script.js").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("application/javascript"));
    assert!(script.contains("fetch('/predict'"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (_dir, app) = app();
    let (status, _, _) = get(app, "/v1/models").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
