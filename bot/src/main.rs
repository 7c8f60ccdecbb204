use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Parser;
use common::{
    DEFAULT_GRID_SIZE, DEFAULT_TICK_INTERVAL_MS, Direction, GameSession, Position, ScoreRecord,
    SessionEvent, SubmitScoreRequest,
};
use reqwest::Client;
use tokio::time::{Duration, MissedTickBehavior};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "snakeboard-bot",
    about = "Play headless snake games and submit the final scores"
)]
struct Args {
    /// Base HTTP URL of the leaderboard server
    #[arg(long, default_value = "http://localhost:8080")]
    url: String,

    /// Number of games to play sequentially
    #[arg(long, default_value_t = 1)]
    games: usize,

    /// Milliseconds between simulation ticks
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Fixed RNG seed; defaults to the clock
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let args = Args::parse();
    let base_url = args.url.trim_end_matches('/').to_string();
    let client = Client::new();

    for game in 0..args.games {
        let seed = args
            .seed
            .unwrap_or_else(|| Utc::now().timestamp_millis() as u64)
            .wrapping_add(game as u64);
        let score = play_game(seed, args.tick_ms).await;
        info!("game {} finished with score {}", game + 1, score);

        let top10 = submit_score(&client, &base_url, score).await?;
        show_leaderboard(&top10);
    }

    // Passive poll, the way the page refreshes its board between games.
    let top10 = fetch_scores(&client, &base_url).await?;
    info!("current leaderboard:");
    show_leaderboard(&top10);
    Ok(())
}

async fn play_game(seed: u64, tick_ms: u64) -> u32 {
    let mut session = GameSession::new(DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE, seed);
    session.start(Utc::now().timestamp_millis());

    let mut ticker = tokio::time::interval(Duration::from_millis(tick_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if let Some(direction) = choose_direction(&session) {
            session.set_direction(direction);
        }
        for event in session.tick(Utc::now().timestamp_millis()) {
            match event {
                SessionEvent::GameOver { score } => return score,
                SessionEvent::FoodEaten { kind, .. } => debug!("ate {:?}", kind),
                SessionEvent::ShieldConsumed { new_direction } => {
                    debug!("shield saved us, swerving {:?}", new_direction)
                }
                _ => {}
            }
        }
    }
}

/// Greedy steering: of the non-reversing moves that stay on the board and
/// off the body, pick the one that closes in on the food.
fn choose_direction(session: &GameSession) -> Option<Direction> {
    let head = session.snake.head();
    let mut best: Option<(Direction, i32)> = None;
    for direction in [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ] {
        if direction.is_opposite(session.snake.direction) {
            continue;
        }
        let next = head.shifted(direction);
        if next.x < 0
            || next.x >= session.width as i16
            || next.y < 0
            || next.y >= session.height as i16
        {
            continue;
        }
        if session.snake.contains(next) {
            continue;
        }
        let distance = manhattan(next, session.food.position);
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((direction, distance));
        }
    }
    best.map(|(direction, _)| direction)
}

fn manhattan(a: Position, b: Position) -> i32 {
    (a.x as i32 - b.x as i32).abs() + (a.y as i32 - b.y as i32).abs()
}

async fn submit_score(client: &Client, base_url: &str, score: u32) -> Result<Vec<ScoreRecord>> {
    let response = client
        .post(format!("{}/submit", base_url))
        .json(&SubmitScoreRequest { score })
        .send()
        .await
        .context("Failed to reach the leaderboard server")?;
    if !response.status().is_success() {
        bail!("submit rejected with status {}", response.status());
    }
    response
        .json()
        .await
        .context("Failed to parse leaderboard response")
}

async fn fetch_scores(client: &Client, base_url: &str) -> Result<Vec<ScoreRecord>> {
    let response = client
        .get(format!("{}/scores", base_url))
        .send()
        .await
        .context("Failed to reach the leaderboard server")?;
    if !response.status().is_success() {
        bail!("scores request failed with status {}", response.status());
    }
    response
        .json()
        .await
        .context("Failed to parse leaderboard response")
}

fn show_leaderboard(records: &[ScoreRecord]) {
    for (index, record) in records.iter().enumerate() {
        info!(
            "#{:<2} {:>6}  {}, {}",
            index + 1,
            record.score,
            record.city,
            record.country
        );
    }
}
