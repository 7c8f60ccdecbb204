pub mod api;
pub mod geo;
pub mod kv;
pub mod leaderboard;
