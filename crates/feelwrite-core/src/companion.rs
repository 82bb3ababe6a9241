//! Supportive companion chat
//!
//! A thin layer over the completion backend: fixed persona, short replies.

use tracing::debug;

use crate::ai::{AIBackend, AIClient, ChatMessage, CompletionRequest, Role};
use crate::config::CompanionConfig;
use crate::error::{Error, Result};

/// Persona for the companion chat
pub const COMPANION_PERSONA: &str = "You are Feelora, an empathetic AI companion focused on emotional well-being.

Your purpose is to:
- Help users understand and process their emotions
- Provide a safe, non-judgmental space for reflection
- Offer gentle guidance based on emotional intelligence principles
- Encourage healthy emotional expression and self-awareness

Guidelines:
- Be warm, compassionate, and conversational
- Ask thoughtful questions to deepen understanding
- Validate emotions without judgment
- Keep responses to 1-3 sentences maximum
- Focus on emotional awareness rather than problem-solving
- Never diagnose or provide medical/therapeutic advice
- If users are in crisis, gently suggest professional help

Remember that you're a supportive companion, not a therapist or medical professional.";

/// Build the companion request for a conversation
///
/// Client-supplied system messages are dropped so the persona cannot be
/// replaced. An empty conversation is `InvalidData`.
pub fn companion_request(messages: &[ChatMessage], config: &CompanionConfig) -> Result<CompletionRequest> {
    let turns: Vec<ChatMessage> = messages
        .iter()
        .filter(|m| m.role != Role::System)
        .cloned()
        .collect();

    if turns.is_empty() {
        return Err(Error::InvalidData("Messages array is required".into()));
    }
    if turns.len() != messages.len() {
        debug!(dropped = messages.len() - turns.len(), "Ignoring client system messages");
    }

    Ok(CompletionRequest {
        system: COMPANION_PERSONA.to_string(),
        messages: turns,
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        timeout: Some(config.timeout),
    })
}

/// Ask the companion for its next reply
pub async fn companion_reply(
    ai: &AIClient,
    messages: &[ChatMessage],
    config: &CompanionConfig,
) -> Result<String> {
    let request = companion_request(messages, config)?;
    ai.complete(&request).await
}
