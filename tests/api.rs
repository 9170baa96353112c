//! HTTP 接口测试：直接对 Router 调用 oneshot，不监听端口

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceExt; // for oneshot
use topup_checker::server::{build_router, AppState};
use topup_checker::{
    App, BatchOptions, BatchProcessor, Config, NumberPolicy, TopUpLookup, UpstreamError,
};

struct FakeLookup;

#[async_trait]
impl TopUpLookup for FakeLookup {
    async fn check_availability(&self, mobile_number: &str) -> Result<bool, UpstreamError> {
        match mobile_number {
            "900000000000" => Err(UpstreamError::AuthorizationFailed),
            n => Ok(n.starts_with("91")),
        }
    }
}

fn test_app() -> Router {
    let processor = BatchProcessor::new(
        Arc::new(FakeLookup),
        BatchOptions::new(2, Duration::from_millis(1)),
        NumberPolicy::default(),
    );
    build_router(Arc::new(AppState::new(processor, "public")))
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/check-topup-bulk")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_empty_list_returns_400() {
    let (status, body) = send(test_app(), post_json(r#"{"mobileNumbers":[]}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No mobile numbers provided." }));
}

#[tokio::test]
async fn test_missing_or_wrong_type_returns_400() {
    for payload in [r#"{}"#, r#"{"mobileNumbers":"911234567890"}"#, r#"{"numbers":["1"]}"#] {
        let (status, body) = send(test_app(), post_json(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No mobile numbers provided.");
    }
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let (status, body) = send(test_app(), post_json("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_results_keep_order_and_errors() {
    let payload = json!({
        "mobileNumbers": ["911234567890", "900000000000", "801234567890", "911111111111", 919999999999u64]
    });
    let (status, body) = send(test_app(), post_json(&payload.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "mobileNumber": "911234567890", "isTopUpAvailable": true },
            { "mobileNumber": "900000000000", "isTopUpAvailable": false, "error": "Authorization failed" },
            { "mobileNumber": "801234567890", "isTopUpAvailable": false },
            { "mobileNumber": "911111111111", "isTopUpAvailable": true },
            { "mobileNumber": "919999999999", "isTopUpAvailable": true }
        ])
    );
}

#[tokio::test]
async fn test_cors_headers_present() {
    let request = Request::builder()
        .method("POST")
        .uri("/check-topup-bulk")
        .header(CONTENT_TYPE, "application/json")
        .header("origin", "http://example.com")
        .body(Body::from(r#"{"mobileNumbers":["911234567890"]}"#))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_static_index_served() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("mobileNumbers"));
}

/// 完整链路：App → RechargeClient → 本地假上游
#[tokio::test]
async fn test_end_to_end_with_stub_upstream() {
    let upstream = Router::new()
        .route(
            "/recharge/mobility/number/{number}",
            get(|| async { ([(SET_COOKIE, "Authorization=stub-token; Path=/")], "ok") }),
        )
        .route(
            "/recharge/plans/serviceId/{number}",
            get(|| async { Json(json!({ "planCategories": [{ "type": "Top-up" }] })) }),
        );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, upstream).await.unwrap();
    });

    let config = Config {
        upstream_base_url: format!("http://{}/recharge", addr),
        legacy_server_connect: false,
        ..Config::default()
    };
    let app = App::initialize(config).unwrap();

    let (status, body) = send(
        app.router(),
        post_json(r#"{"mobileNumbers":["911234567890"]}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "mobileNumber": "911234567890", "isTopUpAvailable": true }])
    );
}
