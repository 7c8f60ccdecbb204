use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use super::KvStore;

/// Redis-backed store. Keys are namespaced under a prefix so the leaderboard
/// can share a database with other tenants.
pub struct RedisKv {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisKv {
    pub async fn connect(url: &str, prefix: &str) -> Result<Self> {
        let client = redis::Client::open(url).context("Invalid Redis URL")?;
        let conn = ConnectionManager::new(client)
            .await
            .context("Failed to create Redis connection manager")?;
        Ok(RedisKv {
            conn,
            prefix: prefix.to_string(),
        })
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

#[async_trait]
impl KvStore for RedisKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(self.full_key(key))
            .await
            .context("Redis GET failed")
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.set(self.full_key(key), value)
            .await
            .context("Redis SET failed")
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del(self.full_key(key))
            .await
            .context("Redis DEL failed")
    }

    async fn list(&self, limit: usize) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        let pattern = format!("{}*", self.prefix);
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .cursor_arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await
                .context("Redis SCAN failed")?;
            for key in batch {
                if keys.len() >= limit {
                    return Ok(keys);
                }
                keys.push(key[self.prefix.len()..].to_string());
            }
            if next == 0 {
                break;
            }
            cursor = next;
        }
        Ok(keys)
    }
}
