use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, http::StatusCode, test, web};
use anyhow::{Result, anyhow};
use serde_json::{Value, json};
use uppe_service::monitoring::ProbeExecutor;
use uppe_service::monitoring::checker::Checker;
use uppe_service::{MonitoringConfig, Orchestrator};

/// Answers 200 for every URL except ones ending in `/down`
struct StubChecker;

#[async_trait::async_trait]
impl Checker for StubChecker {
    async fn check(&self, target: &str) -> Result<u16> {
        if target.ends_with("/down") { Err(anyhow!("Connection failed: refused")) } else { Ok(200) }
    }
}

fn orchestrator() -> web::Data<Orchestrator> {
    let executor = ProbeExecutor::with_checker(Arc::new(StubChecker), Duration::from_secs(5));
    web::Data::new(Orchestrator::with_executor(MonitoringConfig::default(), executor))
}

macro_rules! app {
    ($data:expr) => {
        test::init_service(App::new().app_data($data.clone()).configure(crate::routes::configure))
            .await
    };
}

macro_rules! register {
    ($app:expr, $body:expr) => {{
        let req = test::TestRequest::post().uri("/api/endpoints").set_json($body).to_request();
        let res = test::call_service($app, req).await;
        let status = res.status();
        let body: Value = test::read_body_json(res).await;
        (status, body)
    }};
}

#[actix_web::test]
async fn test_health() {
    let data = orchestrator();
    let app = app!(data);

    let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_register_and_list() {
    let data = orchestrator();
    let app = app!(data);

    let (status, created) =
        register!(&app, json!({ "name": "API", "url": "https://example.com" }));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["expectedStatus"], 200);
    assert_eq!(created["checks"], json!([]));

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/endpoints").to_request(),
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);
    assert_eq!(listed[0]["name"], "API");
}

#[actix_web::test]
async fn test_register_validation_errors() {
    let data = orchestrator();
    let app = app!(data);

    let (status, body) = register!(&app, json!({ "url": "https://example.com" }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name is required");

    let (status, body) = register!(&app, json!({ "name": "API", "url": "" }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "URL is required");

    let req = test::TestRequest::post()
        .uri("/api/endpoints")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Invalid request");

    assert!(data.list_endpoints().await.is_empty());
}

#[actix_web::test]
async fn test_delete_endpoint() {
    let data = orchestrator();
    let app = app!(data);
    let (_, created) = register!(&app, json!({ "name": "API", "url": "https://example.com" }));
    let id = created["id"].as_str().unwrap().to_string();

    let res = test::call_service(
        &app,
        test::TestRequest::delete().uri("/api/endpoints").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let uri = format!("/api/endpoints?id={id}");
    let res = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "success": true }));

    let res = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_check_then_stats() {
    let data = orchestrator();
    let app = app!(data);
    let (_, up) = register!(&app, json!({ "name": "up", "url": "https://example.com/up" }));
    let (_, down) =
        register!(&app, json!({ "name": "down", "url": "https://example.com/down" }));

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post().uri("/api/check").to_request(),
    )
    .await;
    let checks = body["checks"].as_array().unwrap();
    assert_eq!(checks.len(), 2);

    let failed = checks.iter().find(|c| c["id"] == down["id"]).unwrap();
    assert_eq!(failed["status"], Value::Null);
    assert_eq!(failed["responseTime"], Value::Null);
    assert!(failed["error"].as_str().unwrap().contains("refused"));

    let uri = format!("/api/endpoints/{}/stats", up["id"].as_str().unwrap());
    let stats: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(stats["uptime"], 100.0);
    assert_eq!(stats["status"], "up");
    assert_eq!(stats["totalChecks"], 1);

    let uri = format!("/api/endpoints/{}/stats", down["id"].as_str().unwrap());
    let stats: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(stats["uptime"], 0.0);
    assert_eq!(stats["status"], "down");
}

#[actix_web::test]
async fn test_stats_unknown_endpoint() {
    let data = orchestrator();
    let app = app!(data);

    for uri in ["/api/endpoints/not-a-uuid/stats", "/api/endpoints/00000000-0000-0000-0000-000000000000/stats"] {
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}

#[actix_web::test]
async fn test_badge_for_endpoint_without_checks() {
    let data = orchestrator();
    let app = app!(data);
    let (_, created) = register!(&app, json!({ "name": "API", "url": "https://example.com" }));

    let uri = format!("/api/badge/{}", created["id"].as_str().unwrap());
    let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get("content-type").unwrap(), "image/svg+xml");
    assert_eq!(res.headers().get("cache-control").unwrap(), "no-cache");

    let body = test::read_body(res).await;
    let svg = std::str::from_utf8(&body).unwrap();
    assert!(svg.contains(">unknown</text>"));
    assert!(svg.contains("#94a3b8"));
}

#[actix_web::test]
async fn test_badge_after_check() {
    let data = orchestrator();
    let app = app!(data);
    let (_, created) = register!(&app, json!({ "name": "API", "url": "https://example.com" }));
    data.trigger_sweep().await.unwrap();

    let uri = format!("/api/badge/{}", created["id"].as_str().unwrap());
    let body = test::call_and_read_body(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    let svg = std::str::from_utf8(&body).unwrap();
    assert!(svg.contains(">100.0% uptime</text>"));
    assert!(svg.contains("#22c55e"));
}

#[actix_web::test]
async fn test_badge_for_missing_endpoint() {
    let data = orchestrator();
    let app = app!(data);

    let body = test::call_and_read_body(
        &app,
        test::TestRequest::get().uri("/api/badge/nope").to_request(),
    )
    .await;
    assert!(std::str::from_utf8(&body).unwrap().contains(">unknown</text>"));
}
