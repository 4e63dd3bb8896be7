//! Backend trait for driving a quiz.
//!
//! Implemented in-process by [`SessionEngine`](crate::engine::SessionEngine)
//! and over HTTP by the client in `psyche-server`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A freshly started session and its first question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStart {
    pub session_id: String,
    pub question: String,
    pub progress: u32,
}

/// What a backend reports after accepting one answer.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizStep {
    /// More questions remain.
    Next { question: String, progress: u32 },
    /// The session is finished and no longer exists on the backend.
    Complete { result: String },
}

/// Trait for anything that can run a quiz session.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Human-readable backend name (e.g. "local").
    fn name(&self) -> &str;

    /// Start a new session.
    async fn start(&self) -> anyhow::Result<SessionStart>;

    /// Submit a rating for the current question of a session.
    async fn answer(&self, session_id: &str, value: f64) -> anyhow::Result<QuizStep>;
}
