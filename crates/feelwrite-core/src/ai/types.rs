//! AI backend request types
//!
//! These types are backend-agnostic and used across all AI implementations.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A text-completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Persona sent as the leading system message
    pub system: String,
    /// Conversation so far (user/assistant turns)
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    /// Response length cap
    pub max_tokens: u32,
    /// Per-request timeout (None = client default)
    pub timeout: Option<Duration>,
}

impl CompletionRequest {
    /// Single-turn request: persona plus one user prompt
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: 0.7,
            max_tokens: 500,
            timeout: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// System persona followed by the conversation, as sent on the wire
    pub fn wire_messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        messages.push(ChatMessage::system(self.system.clone()));
        messages.extend(self.messages.iter().cloned());
        messages
    }
}
