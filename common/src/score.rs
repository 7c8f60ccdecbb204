use serde::{Deserialize, Serialize};

/// One leaderboard entry, both the stored value and the wire shape served
/// by the scores API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Storage key the record lives under; carried separately from the value.
    #[serde(skip)]
    pub id: String,
    pub score: u32,
    pub city: String,
    pub country: String,
    /// Submission time, epoch milliseconds.
    pub timestamp: i64,
    /// Denormalized rank rewritten during pruning; recoverable from the sort
    /// order, kept for display convenience.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rank: Option<usize>,
}

/// Request body for score submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitScoreRequest {
    pub score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_value_omits_id_and_empty_rank() {
        let record = ScoreRecord {
            id: "abc".into(),
            score: 50,
            city: "Oslo".into(),
            country: "NO".into(),
            timestamp: 1_700_000_000_000,
            rank: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("rank").is_none());
        assert_eq!(json["score"], 50);
        assert_eq!(json["city"], "Oslo");
    }

    #[test]
    fn parses_value_without_rank() {
        let record: ScoreRecord = serde_json::from_str(
            r#"{"score":30,"city":"unknown","country":"XX","timestamp":123}"#,
        )
        .unwrap();
        assert_eq!(record.score, 30);
        assert_eq!(record.rank, None);
        assert_eq!(record.id, "");
    }
}
