use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, MockGif, CATALOGUE_SIZE, NO_MATCH_TAG};
use serde_json::Value;
use tower::ServiceExt;

const KEY: &str = "test-key";

async fn get(uri: &str) -> (StatusCode, Value) {
    let resp = app(KEY)
        .oneshot(Request::builder().uri(uri).body(String::new()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// --- auth ---

#[tokio::test]
async fn missing_key_is_401() {
    let (status, body) = get("/v1/gifs/trending").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid authentication credentials");
}

#[tokio::test]
async fn wrong_key_is_401() {
    let (status, _) = get("/v1/gifs/random?api_key=nope&tag=cat").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// --- random ---

#[tokio::test]
async fn random_returns_single_object() {
    let (status, body) = get("/v1/gifs/random?api_key=test-key&tag=cat").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_object());
    let gif: MockGif = serde_json::from_value(body["data"].clone()).unwrap();
    assert!(gif.id.starts_with("mock"));
}

#[tokio::test]
async fn random_is_deterministic_per_tag() {
    let (_, first) = get("/v1/gifs/random?api_key=test-key&tag=funny+cat").await;
    let (_, second) = get("/v1/gifs/random?api_key=test-key&tag=funny+cat").await;
    assert_eq!(first["data"]["id"], second["data"]["id"]);
}

#[tokio::test]
async fn random_without_match_returns_empty_array() {
    let (status, body) = get(&format!("/v1/gifs/random?api_key=test-key&tag={NO_MATCH_TAG}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn random_without_tag_is_400() {
    for uri in [
        "/v1/gifs/random?api_key=test-key",
        "/v1/gifs/random?api_key=test-key&tag=",
        "/v1/gifs/random?api_key=test-key&tag=+++",
    ] {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["meta"]["status"], 400, "{uri}");
    }
}

// --- search ---

#[tokio::test]
async fn search_honors_limit_and_offset() {
    let (status, body) = get("/v1/gifs/search?api_key=test-key&q=dog&limit=3&offset=10&lang=en").await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["id"], "mock10");
    assert_eq!(body["pagination"]["count"], 3);
    assert_eq!(body["pagination"]["total_count"], CATALOGUE_SIZE);
}

#[tokio::test]
async fn search_without_query_is_400() {
    let (status, body) = get("/v1/gifs/search?api_key=test-key").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["meta"]["status"], 400);
}

// --- trending ---

#[tokio::test]
async fn trending_defaults_to_25() {
    let (_, body) = get("/v1/gifs/trending?api_key=test-key").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 25);
    assert_eq!(body["data"][0]["id"], "mock0");
}

#[tokio::test]
async fn trending_near_end_is_short() {
    let offset = CATALOGUE_SIZE - 2;
    let (_, body) = get(&format!("/v1/gifs/trending?api_key=test-key&limit=10&offset={offset}")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_path_is_404() {
    let resp = app(KEY)
        .oneshot(Request::builder().uri("/v1/stickers/trending").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
