pub mod error;
pub mod scores;
pub mod server;

pub use server::{build_router, run_api_server};
