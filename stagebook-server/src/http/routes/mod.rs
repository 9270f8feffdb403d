//! Route handlers organized by resource

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

use serde::Serialize;

use crate::booking::SearchResults;

/// Search response: the term echoed back with its results
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search_term: String,
    #[serde(flatten)]
    pub results: SearchResults,
}

#[cfg(test)]
pub(crate) mod testing {
    //! Router harness over an in-memory store and a fixed clock

    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use chrono::{DateTime, TimeZone, Utc};
    use tower::ServiceExt;

    use crate::booking::FixedClock;
    use crate::db::MemoryStore;
    use crate::http::{build_router, AppState, ServerConfig};

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 20, 0, 0).unwrap()
    }

    pub fn app() -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::with_clock(store.clone(), Arc::new(FixedClock(now())));
        (build_router(state, &ServerConfig::default()), store)
    }

    pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
        send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(app: &Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap();
        send(app, request).await
    }

    pub async fn delete(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        send(app, request).await
    }
}
