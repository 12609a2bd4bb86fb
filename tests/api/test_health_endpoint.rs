// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Health endpoint tests for GET /health

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
};
use center_finder::api::{create_app, AppState};
use center_finder::config::DEFAULT_MAX_BODY_BYTES;
use center_finder::vision::ModelId;
use tower::util::ServiceExt;

use crate::common::{cache_with, FixedLoader};

#[tokio::test]
async fn test_health_returns_healthy() {
    let (_dir, cache) = cache_with(&[], FixedLoader::new([64.0, 64.0]));
    let app = create_app(AppState::from_cache(cache), DEFAULT_MAX_BODY_BYTES);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], br#"{"status":"healthy"}"#);
}

#[tokio::test]
async fn test_health_does_not_load_models() {
    let loader = FixedLoader::new([64.0, 64.0]);
    let loads = loader.load_count();
    let (_dir, cache) = cache_with(&ModelId::ALL, loader);
    let app = create_app(AppState::from_cache(cache.clone()), DEFAULT_MAX_BODY_BYTES);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(loads.load(std::sync::atomic::Ordering::SeqCst), 0);
    assert!(cache.loaded_models().is_empty());
}

#[tokio::test]
async fn test_health_rejects_post() {
    let (_dir, cache) = cache_with(&[], FixedLoader::new([64.0, 64.0]));
    let app = create_app(AppState::from_cache(cache), DEFAULT_MAX_BODY_BYTES);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
