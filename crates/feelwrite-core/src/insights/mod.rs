//! Weekly emotional insights
//!
//! Turns a user's recent journal entries into a [`WeeklySummary`]: an
//! emotion histogram, a naive keyword list, a per-entry mood timeline and a
//! short natural-language insight.
//!
//! The insight text comes from the configured language model when one is
//! available and answers in time; otherwise a deterministic template is used.
//! Summaries are computed fresh on every call and never stored.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use feelwrite_core::insights::WeeklyAggregator;
//!
//! let aggregator = WeeklyAggregator::new(&db, ai.as_ref(), &config.insights);
//! let summary = aggregator.get_weekly_summary("user-1", Utc::now()).await?;
//! ```
//!
//! [`WeeklySummary`]: crate::models::WeeklySummary

pub mod weekly;

pub use weekly::{
    aggregate, build_insight_prompt, dominant_emotion, empty_window_message, extract_keywords,
    fallback_insight, Aggregation, WeeklyAggregator, INSIGHT_PERSONA,
};
