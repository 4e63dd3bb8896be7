//! psyche-server — HTTP transport for the psyche session engine.
//!
//! Exposes `start` and `answer` over JSON, loads server configuration, sweeps
//! idle sessions in the background, and ships a client for the same contract.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod sweeper;

pub use client::QuizClient;
pub use config::{load_config_from, ServerConfig};
pub use error::ClientError;
pub use server::{create_router, serve, AppContext};
