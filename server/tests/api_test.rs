use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use server::api::build_router;
use server::kv::{KvStore, MemoryKv};
use server::leaderboard::Leaderboard;

fn app_with_store() -> (Arc<MemoryKv>, Router) {
    let kv = Arc::new(MemoryKv::new());
    let leaderboard = Arc::new(Leaderboard::new(kv.clone() as Arc<dyn KvStore>));
    (kv, build_router(leaderboard, None))
}

async fn response_json(response: axum::response::Response) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn submit_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/submit")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

#[tokio::test]
async fn submit_then_scores_round_trip() -> Result<()> {
    let (_kv, app) = app_with_store();

    let request = Request::builder()
        .method("POST")
        .uri("/submit")
        .header("content-type", "application/json")
        .header("cf-ipcity", "Oslo")
        .header("cf-ipcountry", "NO")
        .body(Body::from(r#"{"score":50}"#))?;
    let response = app.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let top10 = response_json(response).await?;
    assert_eq!(top10[0]["score"], 50);
    assert_eq!(top10[0]["city"], "Oslo");
    assert_eq!(top10[0]["country"], "NO");

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/scores").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let scores = response_json(response).await?;
    assert_eq!(scores.as_array().map(|a| a.len()), Some(1));
    assert_eq!(scores[0]["score"], 50);
    assert_eq!(scores[0]["city"], "Oslo");

    let response = app
        .oneshot(submit_request(r#"{"score":30}"#))
        .await?;
    let top10 = response_json(response).await?;
    assert_eq!(top10[0]["score"], 50);
    assert_eq!(top10[1]["score"], 30);
    Ok(())
}

#[tokio::test]
async fn missing_geo_headers_fall_back_to_sentinels() -> Result<()> {
    let (_kv, app) = app_with_store();
    let response = app.oneshot(submit_request(r#"{"score":10}"#)).await?;
    let top10 = response_json(response).await?;
    assert_eq!(top10[0]["city"], "unknown");
    assert_eq!(top10[0]["country"], "XX");
    Ok(())
}

#[tokio::test]
async fn non_numeric_score_is_rejected_and_not_persisted() -> Result<()> {
    let (kv, app) = app_with_store();
    let response = app.oneshot(submit_request(r#"{"score":"abc"}"#)).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await?;
    assert!(body["error"].is_string());
    assert!(kv.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn negative_and_fractional_scores_are_rejected() -> Result<()> {
    let (kv, app) = app_with_store();
    for payload in [r#"{"score":-3}"#, r#"{"score":1.5}"#, r#"{}"#] {
        let response = app.clone().oneshot(submit_request(payload)).await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{payload}");
    }
    assert!(kv.is_empty().await);
    Ok(())
}

/// Store whose every operation fails, to exercise the 500 path.
struct BrokenKv;

#[async_trait]
impl KvStore for BrokenKv {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(anyhow!("kv backend unavailable"))
    }
    async fn put(&self, _key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("kv backend unavailable"))
    }
    async fn delete(&self, _key: &str) -> Result<()> {
        Err(anyhow!("kv backend unavailable"))
    }
    async fn list(&self, _limit: usize) -> Result<Vec<String>> {
        Err(anyhow!("kv backend unavailable"))
    }
}

#[tokio::test]
async fn store_failure_surfaces_as_500_with_error_body() -> Result<()> {
    let leaderboard = Arc::new(Leaderboard::new(Arc::new(BrokenKv) as Arc<dyn KvStore>));
    let app = build_router(leaderboard, None);

    let response = app.clone().oneshot(submit_request(r#"{"score":10}"#)).await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await?;
    assert!(body["error"].as_str().unwrap().contains("unavailable"));

    let response = app
        .oneshot(Request::builder().uri("/scores").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}
