//! Mock backend for testing
//!
//! Returns a canned reply (or a forced failure) without any network access,
//! and counts how often it was asked to generate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::types::CompletionRequest;
use super::AIBackend;

const DEFAULT_REPLY: &str =
    "You showed up for yourself this week. Keep noticing what lifts you and be gentle with what weighs on you.";

/// Mock AI backend for testing
#[derive(Clone)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    reply: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a new mock backend (healthy, canned reply)
    pub fn new() -> Self {
        Self {
            healthy: true,
            reply: Some(DEFAULT_REPLY.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Mock that answers every request with `reply`
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            ..Self::new()
        }
    }

    /// Mock whose generation always fails
    pub fn failing() -> Self {
        Self {
            healthy: false,
            reply: None,
            ..Self::new()
        }
    }

    /// Number of `complete` calls made so far (shared across clones)
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Some(reply) if !reply.trim().is_empty() => Ok(reply.trim().to_string()),
            Some(_) => Err(Error::Generation("Model returned an empty reply".into())),
            None => Err(Error::Generation("Mock backend configured to fail".into())),
        }
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
