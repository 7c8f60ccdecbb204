use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::geo::GeoInfo;
use crate::kv::KvStore;
use common::ScoreRecord;

/// Entries retained after a reconcile pass.
pub const MAX_LEADERBOARD_SIZE: usize = 10;

/// Upper bound on keys fetched per listing pass.
pub const LIST_BATCH_LIMIT: usize = 1000;

/// Ranking maintainer over a flat key-value namespace.
///
/// The list/fetch/prune pass is not transactional: two concurrent submissions
/// can each list a store state that does not yet reflect the other's write,
/// so readers may transiently observe more than `MAX_LEADERBOARD_SIZE`
/// records or miss a just-submitted score. The protocol guarantees
/// convergence, not linearizability: once submissions quiesce, the next
/// reconcile drives the store to exactly the correct top set. Do not "fix"
/// the transient states with cross-key atomicity the store does not offer.
pub struct Leaderboard {
    kv: Arc<dyn KvStore>,
}

impl Leaderboard {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Leaderboard { kv }
    }

    /// Persists a new record under a fresh id, reconciles, and returns the
    /// refreshed top list.
    pub async fn submit(&self, score: u32, geo: GeoInfo, now_ms: i64) -> Result<Vec<ScoreRecord>> {
        let record = ScoreRecord {
            id: Uuid::new_v4().to_string(),
            score,
            city: geo.city,
            country: geo.country,
            timestamp: now_ms,
            rank: None,
        };
        let value = serde_json::to_string(&record).context("Failed to encode score record")?;
        self.kv.put(&record.id, &value).await?;
        self.reconcile().await
    }

    /// Read-only ranking over everything currently stored. Never deletes.
    pub async fn query(&self) -> Result<Vec<ScoreRecord>> {
        let mut records = self.load_all().await?;
        sort_by_rank(&mut records);
        records.truncate(MAX_LEADERBOARD_SIZE);
        Ok(records)
    }

    /// Re-ranks all stored records, deletes everything outside the top set,
    /// and rewrites the keepers with their denormalized rank. Idempotent, so
    /// an abandoned half-finished pass is healed by the next one.
    pub async fn reconcile(&self) -> Result<Vec<ScoreRecord>> {
        let mut records = self.load_all().await?;
        sort_by_rank(&mut records);
        let overflow = records.split_off(records.len().min(MAX_LEADERBOARD_SIZE));
        for record in &overflow {
            self.kv.delete(&record.id).await?;
        }
        if !overflow.is_empty() {
            debug!(
                "pruned {} records below the top {}",
                overflow.len(),
                MAX_LEADERBOARD_SIZE
            );
        }
        for (index, record) in records.iter_mut().enumerate() {
            record.rank = Some(index + 1);
            let value = serde_json::to_string(record).context("Failed to encode score record")?;
            self.kv.put(&record.id, &value).await?;
        }
        Ok(records)
    }

    async fn load_all(&self) -> Result<Vec<ScoreRecord>> {
        let keys = self.kv.list(LIST_BATCH_LIMIT).await?;
        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(raw) = self.kv.get(&key).await? else {
                // Deleted by a concurrent reconcile between list and get.
                continue;
            };
            match serde_json::from_str::<ScoreRecord>(&raw) {
                Ok(mut record) => {
                    record.id = key;
                    records.push(record);
                }
                Err(e) => warn!("skipping unparseable record {}: {}", key, e),
            }
        }
        Ok(records)
    }
}

// Score descending; earlier submission wins ties.
fn sort_by_rank(records: &mut [ScoreRecord]) {
    records.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.timestamp.cmp(&b.timestamp))
    });
}
