mod memory;
mod redis;

pub use memory::MemoryKv;
pub use redis::RedisKv;

use anyhow::Result;
use async_trait::async_trait;

/// Flat key-value namespace the leaderboard runs against.
///
/// Only single-key primitives are assumed: no transactions, no
/// compare-and-swap, no atomicity across keys. The ranking protocol is built
/// to converge on top of exactly this.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn put(&self, key: &str, value: &str) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
    /// Lists up to `limit` keys, in no particular order.
    async fn list(&self, limit: usize) -> Result<Vec<String>>;
}
