use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use super::error::ApiError;
use crate::geo::GeoInfo;
use crate::leaderboard::Leaderboard;
use common::ScoreRecord;

#[derive(Clone)]
pub struct ScoresState {
    pub leaderboard: Arc<Leaderboard>,
}

/// POST /submit — persist a final score and return the refreshed top-10.
pub async fn submit_score(
    State(state): State<ScoresState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Vec<ScoreRecord>>, ApiError> {
    let score = parse_score(&body)?;
    let geo = GeoInfo::from_headers(&headers);
    info!("score submission: {} from {}, {}", score, geo.city, geo.country);
    let top10 = state
        .leaderboard
        .submit(score, geo, Utc::now().timestamp_millis())
        .await?;
    Ok(Json(top10))
}

/// GET /scores — current top-10, read-only, no pruning side effect.
pub async fn get_scores(
    State(state): State<ScoresState>,
) -> Result<Json<Vec<ScoreRecord>>, ApiError> {
    Ok(Json(state.leaderboard.query().await?))
}

// A score must arrive as a finite, non-negative, integral JSON number.
fn parse_score(body: &Value) -> Result<u32, ApiError> {
    let value = body
        .get("score")
        .ok_or_else(|| ApiError::Validation("score is required".to_string()))?;
    let number = value
        .as_f64()
        .ok_or_else(|| ApiError::Validation("score must be a number".to_string()))?;
    if !number.is_finite() || number < 0.0 || number.fract() != 0.0 || number > u32::MAX as f64 {
        return Err(ApiError::Validation(
            "score must be a non-negative integer".to_string(),
        ));
    }
    Ok(number as u32)
}
