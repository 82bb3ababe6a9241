//! Feel-Write Core Library
//!
//! Shared functionality for the Feel-Write journaling backend:
//! - Database access, migrations and the emotion taxonomy seed
//! - Journal entries, reflections, users, streaks and stats
//! - Weekly emotional insight aggregation
//! - Pluggable language model backends (OpenAI-compatible, Ollama)
//! - Supportive companion chat

pub mod ai;
pub mod companion;
pub mod config;
pub mod db;
pub mod error;
pub mod insights;
pub mod models;
pub mod taxonomy;

/// Test utilities including a mock chat-completions server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{
    AIBackend, AIClient, ChatMessage, CompletionRequest, MockBackend, OllamaBackend,
    OpenAICompatibleBackend, Role,
};
pub use companion::{companion_reply, COMPANION_PERSONA};
pub use config::{AppConfig, CompanionConfig, InsightConfig};
pub use db::Database;
pub use error::{Error, Result};
pub use insights::WeeklyAggregator;
