// tests/healthz_tests.rs
use hyper::{Body, Request, Response, StatusCode};
use mock_healthz::config::Tier;
use mock_healthz::health::{CheckRegistry, CheckSpec, FixedOutcome, HealthEngine};
use mock_healthz::server::RequestHandler;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn check(name: &str, tier: Tier, failed: bool, depends_on: &[&str]) -> CheckSpec {
    CheckSpec::builder(name, tier)
        .depends_on(depends_on.iter().copied())
        .outcome(FixedOutcome::new(120, failed))
        .build()
}

/// Default layout with every outcome pinned.
fn pinned_handler(failing: &[&str]) -> RequestHandler {
    let fails = |name: &str| failing.iter().any(|failed| *failed == name);
    let roots = ["db_connection", "config_service"];

    let registry = CheckRegistry::new(vec![
        check("db_connection", Tier::Critical, fails("db_connection"), &[]),
        check("config_service", Tier::Critical, fails("config_service"), &[]),
        check("internal_api/billing", Tier::Critical, fails("internal_api/billing"), &roots),
        check("internal_api/usage", Tier::Critical, fails("internal_api/usage"), &roots),
        check("external_api/alipay", Tier::External, fails("external_api/alipay"), &[]),
        check("external_api/sms", Tier::External, fails("external_api/sms"), &[]),
    ])
    .unwrap();

    RequestHandler::new(HealthEngine::new(Arc::new(registry)))
}

async fn get(handler: RequestHandler, uri: &str) -> (StatusCode, String, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response: Response<Body> = handler.oneshot(request).await.unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(hyper::header::CONTENT_TYPE)
        .map(|value| value.to_str().unwrap().to_string())
        .unwrap_or_default();
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();

    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_external_failure_keeps_service_healthy() {
    let handler = pinned_handler(&["external_api/sms"]);

    let (status, _, body) = get(handler.clone(), "/healthz?format=json").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["data"]["message"], "All critical checks passed");

    let (status, content_type, metrics) = get(handler, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "text/plain; version=0.0.4");
    assert!(metrics
        .lines()
        .any(|line| line == r#"healthcheck_status{check="external_api/sms",type="external"} 0"#));
}

#[tokio::test]
async fn test_internal_api_error_fails_healthz() {
    let handler = pinned_handler(&["internal_api/usage"]);

    let (status, content_type, body) = get(handler, "/healthz?format=json").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(content_type, "application/json");

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["data"]["message"], "Some critical checks failed");

    let usage = &json["data"]["checks"]["critical"][3];
    assert_eq!(usage["name"], "internal_api/usage");
    assert_eq!(usage["status"], "error");
    assert_eq!(usage["message"], "internal_api/usage returned error");
}

#[tokio::test]
async fn test_database_failure_skips_internal_apis() {
    let handler = pinned_handler(&["db_connection"]);

    let (status, _, body) = get(handler.clone(), "/healthz").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("internal_api/billing    FAIL    Skipped due to upstream failure"));
    assert!(body.contains("internal_api/usage      FAIL    Skipped due to upstream failure"));

    let (_, _, body) = get(handler.clone(), "/healthz?format=json").await;
    let json: Value = serde_json::from_str(&body).unwrap();
    for dependent in &json["data"]["checks"]["critical"].as_array().unwrap()[2..] {
        assert_eq!(dependent["status"], "error");
        assert_eq!(dependent["message"], "Skipped due to upstream failure");
    }

    // metrics never gate on health
    let (status, _, metrics) = get(handler, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(metrics.contains(r#"healthcheck_status{check="internal_api/billing",type="critical"} 0"#));
}

#[tokio::test]
async fn test_text_is_the_default_format() {
    let (status, content_type, body) = get(pinned_handler(&[]), "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/plain"));
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines[0], "CHECK                   STATUS  MESSAGE");
    assert_eq!(lines[1], "----- CRITICAL -----");
    assert_eq!(lines[6], "----- EXTERNAL -----");
    assert_eq!(lines[7], "external_api/alipay     PASS    external_api/alipay OK (120ms)");
}

#[tokio::test]
async fn test_unknown_format_is_rejected() {
    let (status, _, body) = get(pinned_handler(&[]), "/healthz?format=xml").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("xml"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, _, body) = get(pinned_handler(&[]), "/readyz").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Not Found");
}

#[tokio::test]
async fn test_builtin_registry_serves_both_routes() {
    let registry = CheckRegistry::builtin().unwrap();
    let handler = RequestHandler::new(HealthEngine::new(Arc::new(registry)));

    let (status, _, body) = get(handler.clone(), "/healthz?format=json").await;
    assert!(status == StatusCode::OK || status == StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["data"]["checks"]["critical"].as_array().unwrap().len(), 4);
    assert_eq!(json["data"]["checks"]["external"].as_array().unwrap().len(), 2);

    let (status, _, metrics) = get(handler, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    let samples = metrics
        .lines()
        .filter(|line| line.starts_with("healthcheck_status{"))
        .count();
    assert_eq!(samples, 6);
}
