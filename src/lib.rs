//! Roast.fm - Server Library
//!
//! Backend for the Roast.fm novelty app. It covers:
//! - The Last.fm auth handshake and signed API calls
//! - Concurrent aggregation of one user's listening history
//! - The multi-turn roast conversation driven over HTTP
//! - LLM-written questions and replies with deterministic fallbacks

pub mod config;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use config::AppConfig;
pub use routes::router;
pub use state::AppState;
pub use utils::error::{AppError, AppResult};
