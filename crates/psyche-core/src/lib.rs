//! psyche-core — Session engine, scoring, and narrative generation.
//!
//! This crate defines the question bank, the per-session state machine, and
//! the pure scoring function that turns twelve ratings into a narrative.

pub mod engine;
pub mod error;
pub mod model;
pub mod narrative;
pub mod statistics;
pub mod traits;

pub use engine::{AnswerOutcome, SessionEngine};
pub use error::SessionError;
pub use traits::{QuizBackend, QuizStep, SessionStart};
