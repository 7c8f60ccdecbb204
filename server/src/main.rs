use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use server::api::run_api_server;
use server::kv::{KvStore, MemoryKv, RedisKv};
use server::leaderboard::Leaderboard;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if exists
    dotenv::dotenv().ok();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let bind = env::var("SNAKEBOARD_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let web_dir = env::var("SNAKEBOARD_WEB_DIR").ok();

    let kv: Arc<dyn KvStore> = match env::var("SNAKEBOARD_REDIS_URL") {
        Ok(url) => {
            let prefix = env::var("SNAKEBOARD_KV_PREFIX").unwrap_or_else(|_| "score:".to_string());
            Arc::new(
                RedisKv::connect(&url, &prefix)
                    .await
                    .context("Failed to connect to Redis")?,
            )
        }
        Err(_) => {
            warn!("SNAKEBOARD_REDIS_URL not set, using in-memory store; scores will not survive a restart");
            Arc::new(MemoryKv::new())
        }
    };

    let leaderboard = Arc::new(Leaderboard::new(kv));
    run_api_server(&bind, leaderboard, web_dir.as_deref()).await
}
