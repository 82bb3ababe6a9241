//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - `init` and shared utilities (open_db, load_config)
//! - `emotions` - Emotion taxonomy listing
//! - `entries` - Journal entry commands (list, show, add, reflect)
//! - `prompts` - Reflection prompt listing
//! - `serve` - Web server command
//! - `summary` - Weekly summary and streak commands

pub mod core;
pub mod emotions;
pub mod entries;
pub mod prompts;
pub mod serve;
pub mod summary;

// Re-export command functions for main.rs
pub use core::*;
pub use emotions::*;
pub use entries::*;
pub use prompts::*;
pub use serve::*;
pub use summary::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Parse a category argument into the core enum
pub(crate) fn parse_category(value: &str) -> anyhow::Result<feelwrite_core::models::EmotionCategory> {
    value.parse().map_err(|e: String| anyhow::anyhow!(e))
}
