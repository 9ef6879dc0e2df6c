use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use comicgate_core::{GatewayConfig, ManualClock};
use comicgate_server::{restapi::create_router, AppState};
use httpmock::{Method::GET, MockServer};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::ServiceExt;

const PUBLIC_KEY: &str = "test-public";
const PRIVATE_KEY: &str = "test-private";
const NOW_MS: i64 = 1_700_000_000_000;

fn expected_hash(ts: i64) -> String {
    format!("{:x}", md5::compute(format!("{}{}{}", ts, PRIVATE_KEY, PUBLIC_KEY)))
}

fn gateway_config(base_url: String, deadline_ms: u64) -> GatewayConfig {
    GatewayConfig {
        base_url,
        public_key: PUBLIC_KEY.to_string(),
        private_key: PRIVATE_KEY.to_string(),
        deadline: Duration::from_millis(deadline_ms),
    }
}

fn router_for(server: &MockServer, deadline_ms: u64) -> Router {
    let config = gateway_config(server.url("/v1/public"), deadline_ms);
    let state = AppState::with_clock(&config, Arc::new(ManualClock::new(NOW_MS))).unwrap();
    create_router(state)
}

fn items(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| json!({"resourceURI": format!("http://example.com/comics/{}", i), "name": format!("Comic {}", i)}))
        .collect()
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn comics_forwards_signed_credentials_and_caller_filters() {
    let server = MockServer::start_async().await;
    let ts = NOW_MS.to_string();
    let hash = expected_hash(NOW_MS);
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/public/comics")
            .query_param("ts", ts.as_str())
            .query_param("apikey", PUBLIC_KEY)
            .query_param("hash", hash.as_str())
            .query_param("characters", "1009368")
            .query_param("orderBy", "-onsaleDate");
        then.status(200).json_body(json!({
            "code": 200,
            "status": "Ok",
            "data": {"results": [{
                "id": 1, "title": "Iron Man (1968) #1", "pageCount": 36,
                "isbn": "", "prices": [{"type": "printPrice", "price": 0}]
            }]}
        }));
    });

    let router = router_for(&server, 2_000);
    let (status, body) =
        get(&router, "/api/upstream/comics?characters=1009368&orderBy=-onsaleDate").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(mock.hits(), 1);
    let comic = &body["data"]["results"][0];
    assert_eq!(comic["title"], "Iron Man (1968) #1");
    assert_eq!(comic["pageCount"], 36);
    assert!(comic.get("prices").is_none());
}

#[tokio::test]
async fn character_lookup_uses_path_id_and_truncates_summaries() {
    let server = MockServer::start_async().await;
    let hash = expected_hash(NOW_MS);
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/public/characters/1009368")
            .query_param("apikey", PUBLIC_KEY)
            .query_param("hash", hash.as_str());
        then.status(200).json_body(json!({
            "code": 200,
            "data": {"results": [{
                "id": 1009368,
                "name": "Iron Man",
                "comics": {"available": 2727, "items": items(7)},
                "series": {"available": 660, "items": items(2)},
                "events": {"available": 31, "items": items(5)}
            }]}
        }));
    });

    let router = router_for(&server, 2_000);
    let (status, body) = get(&router, "/api/upstream/character?id=1009368&limit=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(mock.hits(), 1);
    let character = &body["data"]["results"][0];
    assert_eq!(character["comics"]["items"].as_array().unwrap().len(), 5);
    assert_eq!(character["series"]["items"].as_array().unwrap().len(), 2);
    assert!(character.get("events").is_none());
}

#[tokio::test]
async fn character_without_id_is_rejected_before_any_upstream_call() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200).json_body(json!({"code": 200}));
    });

    let router = router_for(&server, 2_000);
    for uri in ["/api/upstream/character", "/api/upstream/character?id=", "/api/upstream/character?name=Thor"] {
        let (status, body) = get(&router, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["success"], Value::Bool(false));
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn unknown_resource_kind_is_not_found() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200).json_body(json!({"code": 200}));
    });

    let router = router_for(&server, 2_000);
    let (status, body) = get(&router, "/api/upstream/creators?limit=5").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "API endpoint not found");
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn unmatched_paths_get_json_not_found() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200).json_body(json!({"code": 200}));
    });

    let router = router_for(&server, 2_000);
    for uri in ["/api/upstream/", "/api/upstream/comics/", "/api/nothing-here"] {
        let (status, body) = get(&router, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "API endpoint not found");
        assert!(body["metadata"]["request_id"].is_string());
    }
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn slow_upstream_is_aborted_with_request_timeout() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/v1/public/series");
        then.status(200)
            .json_body(json!({"code": 200, "data": {"results": []}}))
            .delay(Duration::from_millis(1_500));
    });

    let router = router_for(&server, 100);
    let started = Instant::now();
    let (status, body) = get(&router, "/api/upstream/series?characters=1").await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body["error"]["code"], "UPSTREAM_TIMEOUT");
    assert!(
        started.elapsed() < Duration::from_millis(1_000),
        "gateway waited {:?} for an upstream past its deadline",
        started.elapsed()
    );
}

#[tokio::test]
async fn unparseable_upstream_body_is_internal_error() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/v1/public/characters");
        then.status(200).header("content-type", "text/html").body("<html>maintenance</html>");
    });

    let router = router_for(&server, 2_000);
    let (status, body) = get(&router, "/api/upstream/characters").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    assert_eq!(body["error"]["message"], "Failed to fetch from upstream API");
}

#[tokio::test]
async fn unreachable_upstream_is_internal_error() {
    let config = gateway_config("http://127.0.0.1:1/v1/public".to_string(), 2_000);
    let router = create_router(AppState::from_config(&config).unwrap());

    let (status, body) = get(&router, "/api/upstream/comics").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn upstream_error_status_and_body_are_mirrored() {
    let server = MockServer::start_async().await;
    let upstream_body = json!({"code": "InvalidCredentials", "message": "The passed API key is invalid."});
    server.mock(|when, then| {
        when.method(GET).path("/v1/public/characters");
        then.status(401).json_body(upstream_body.clone());
    });

    let router = router_for(&server, 2_000);
    let (status, body) = get(&router, "/api/upstream/characters?nameStartsWith=Iron").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, upstream_body);
}

#[tokio::test]
async fn request_id_is_echoed() {
    let server = MockServer::start_async().await;
    let router = router_for(&server, 2_000);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/upstream/unknown")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["metadata"]["request_id"], "req-42");

    let response = router
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn health_reports_service() {
    let server = MockServer::start_async().await;
    let router = router_for(&server, 2_000);

    let (status, body) = get(&router, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "comicgate-server");
}
