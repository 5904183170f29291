//! In-memory stand-in for the Giphy GIF endpoints.
//!
//! Serves `/v1/gifs/random`, `/v1/gifs/search` and `/v1/gifs/trending` from a
//! fixed catalogue of `CATALOGUE_SIZE` GIFs so clients can be exercised
//! without a network or a real key.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

/// Number of GIFs the server knows about.
pub const CATALOGUE_SIZE: usize = 60;

/// Tag for which the random endpoint finds nothing.
pub const NO_MATCH_TAG: &str = "no-match";

const DEFAULT_LIMIT: usize = 25;
const MAX_LIMIT: usize = 50;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MockGif {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub url: String,
    pub slug: String,
    pub bitly_url: String,
    pub embed_url: String,
    pub title: String,
    pub rating: String,
}

impl MockGif {
    pub fn numbered(n: usize) -> Self {
        let id = format!("mock{n}");
        Self {
            kind: "gif".to_string(),
            url: format!("https://giphy.com/gifs/mock-gif-{n}-{id}"),
            slug: format!("mock-gif-{n}-{id}"),
            bitly_url: format!("https://gph.is/g/{id}"),
            embed_url: format!("https://giphy.com/embed/{id}"),
            title: format!("Mock GIF {n}"),
            rating: "g".to_string(),
            id,
        }
    }
}

struct MockState {
    api_key: String,
    catalogue: Vec<MockGif>,
}

type SharedState = Arc<MockState>;

#[derive(Deserialize)]
pub struct RandomQuery {
    pub api_key: Option<String>,
    pub tag: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub api_key: Option<String>,
    pub q: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub lang: Option<String>,
}

#[derive(Deserialize)]
pub struct TrendingQuery {
    pub api_key: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

/// Router that accepts only `api_key`.
pub fn app(api_key: &str) -> Router {
    let state: SharedState = Arc::new(MockState {
        api_key: api_key.to_string(),
        catalogue: (0..CATALOGUE_SIZE).map(MockGif::numbered).collect(),
    });
    Router::new()
        .route("/v1/gifs/random", get(random))
        .route("/v1/gifs/search", get(search))
        .route("/v1/gifs/trending", get(trending))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

async fn random(State(state): State<SharedState>, Query(query): Query<RandomQuery>) -> ApiResult {
    authorize(&state, query.api_key.as_deref())?;
    let tag = query.tag.unwrap_or_default();
    if tag.trim().is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "Bad Request"));
    }
    debug!(%tag, "random");
    if tag == NO_MATCH_TAG {
        return Ok(envelope(json!([]), None));
    }
    let index = tag.bytes().map(usize::from).sum::<usize>() % state.catalogue.len();
    Ok(envelope(json!(state.catalogue[index]), None))
}

async fn search(State(state): State<SharedState>, Query(query): Query<SearchQuery>) -> ApiResult {
    authorize(&state, query.api_key.as_deref())?;
    let q = query.q.unwrap_or_default();
    if q.trim().is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "Bad Request"));
    }
    debug!(%q, lang = query.lang.as_deref().unwrap_or("en"), "search");
    Ok(page(&state, query.limit, query.offset))
}

async fn trending(State(state): State<SharedState>, Query(query): Query<TrendingQuery>) -> ApiResult {
    authorize(&state, query.api_key.as_deref())?;
    debug!("trending");
    Ok(page(&state, query.limit, query.offset))
}

fn authorize(state: &MockState, api_key: Option<&str>) -> Result<(), (StatusCode, Json<Value>)> {
    if api_key == Some(state.api_key.as_str()) {
        return Ok(());
    }
    Err((
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Invalid authentication credentials" })),
    ))
}

fn failure(status: StatusCode, msg: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({ "data": [], "meta": { "status": status.as_u16(), "msg": msg } })),
    )
}

fn page(state: &MockState, limit: Option<usize>, offset: Option<usize>) -> Json<Value> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = offset.unwrap_or(0);
    let start = offset.min(state.catalogue.len());
    let end = (start + limit).min(state.catalogue.len());
    let items = &state.catalogue[start..end];
    let pagination = json!({
        "total_count": state.catalogue.len(),
        "count": items.len(),
        "offset": offset,
    });
    envelope(json!(items), Some(pagination))
}

fn envelope(data: Value, pagination: Option<Value>) -> Json<Value> {
    let mut body = json!({
        "data": data,
        "meta": { "status": 200, "msg": "OK", "response_id": "mock" },
    });
    if let Some(pagination) = pagination {
        body["pagination"] = pagination;
    }
    Json(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_gif_serializes_like_giphy() {
        let json = serde_json::to_value(MockGif::numbered(3)).unwrap();
        assert_eq!(json["type"], "gif");
        assert_eq!(json["id"], "mock3");
        assert_eq!(json["bitly_url"], "https://gph.is/g/mock3");
        assert_eq!(json["embed_url"], "https://giphy.com/embed/mock3");
    }

    #[test]
    fn page_is_cut_at_catalogue_end() {
        let state = MockState {
            api_key: "k".to_string(),
            catalogue: (0..10).map(MockGif::numbered).collect(),
        };
        let Json(body) = page(&state, Some(5), Some(8));
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["pagination"]["count"], 2);
        assert_eq!(body["pagination"]["offset"], 8);
    }

    #[test]
    fn page_past_end_is_empty() {
        let state = MockState {
            api_key: "k".to_string(),
            catalogue: (0..10).map(MockGif::numbered).collect(),
        };
        let Json(body) = page(&state, None, Some(40));
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[test]
    fn wrong_key_is_unauthorized() {
        let state = MockState {
            api_key: "k".to_string(),
            catalogue: Vec::new(),
        };
        assert!(authorize(&state, Some("k")).is_ok());
        let (status, _) = authorize(&state, Some("other")).unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(authorize(&state, None).is_err());
    }
}
