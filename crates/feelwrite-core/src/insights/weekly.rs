//! Weekly insight aggregator

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::ai::{AIBackend, AIClient, CompletionRequest};
use crate::config::InsightConfig;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{EmotionCategory, EmotionalPattern, MoodChange, WeeklySummary, WindowEntry};
use crate::taxonomy::random_quote;

/// System persona for insight generation
pub const INSIGHT_PERSONA: &str =
    "You are a supportive and insightful emotional well-being assistant.";

/// Tokens taken from the start of each entry
const KEYWORD_PREFIX: usize = 5;
const MAX_KEYWORDS: usize = 5;

/// Mood timeline samples carry no real intensity yet
const MOOD_INTENSITY: f64 = 1.0;

/// Histogram, keywords and timeline for one window
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub patterns: Vec<EmotionalPattern>,
    pub key_themes: Vec<String>,
    pub mood_changes: Vec<MoodChange>,
    /// Texts of the entries that contributed to the histogram
    pub texts: Vec<String>,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Aggregate window entries in the order given
///
/// Entries without a resolved category are skipped. When nothing resolves
/// the result is entirely empty.
pub fn aggregate(entries: &[WindowEntry]) -> Aggregation {
    let mut counts: Vec<(EmotionCategory, u32)> = Vec::new();
    let mut mood_changes = Vec::new();
    let mut texts = Vec::new();

    for entry in entries {
        let Some(category) = entry.category else {
            warn!(entry_id = %entry.id, "Skipping journal entry with unknown emotion category");
            continue;
        };

        match counts.iter_mut().find(|(c, _)| *c == category) {
            Some((_, count)) => *count += 1,
            None => counts.push((category, 1)),
        }

        mood_changes.push(MoodChange {
            date: entry.created_at,
            emotion: category.as_str().to_string(),
            intensity: MOOD_INTENSITY,
        });
        texts.push(entry.text.clone());
    }

    let total: u32 = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Aggregation::default();
    }

    let patterns = counts
        .into_iter()
        .map(|(category, count)| EmotionalPattern {
            emotion: category.as_str().to_string(),
            count,
            percentage: 100.0 * f64::from(count) / f64::from(total),
        })
        .collect();

    Aggregation {
        patterns,
        key_themes: extract_keywords(entries.iter().map(|e| e.text.as_str())),
        mood_changes,
        texts,
    }
}

/// Naive keyword list: lower-cased first words of each text, at most five
pub fn extract_keywords<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut words = BTreeSet::new();
    for text in texts {
        words.extend(
            text.to_lowercase()
                .split_whitespace()
                .take(KEYWORD_PREFIX)
                .map(str::to_string),
        );
    }
    words.into_iter().take(MAX_KEYWORDS).collect()
}

/// Pattern with the highest count; the earliest one wins ties
pub fn dominant_emotion(patterns: &[EmotionalPattern]) -> Option<&EmotionalPattern> {
    patterns.iter().fold(None, |best, p| match best {
        Some(b) if b.count >= p.count => Some(b),
        _ => Some(p),
    })
}

/// Placeholder insight for a window with no entries
pub fn empty_window_message(quote: &str) -> String {
    format!(
        "{} Start journaling to track your emotional journey and gain deeper insights!",
        quote
    )
}

/// Deterministic insight used when the language model is unavailable
pub fn fallback_insight(patterns: &[EmotionalPattern], mood_changes: &[MoodChange]) -> String {
    let Some(dominant) = dominant_emotion(patterns) else {
        return "No entries found for this period. Start journaling to get insights!".to_string();
    };

    let distinct: BTreeSet<&str> = mood_changes.iter().map(|m| m.emotion.as_str()).collect();
    let stability = match distinct.len() {
        0..=2 => "You've shown consistent emotional patterns this week.",
        3..=4 => "You've experienced a moderate range of emotions this week.",
        _ => "You've had a diverse emotional experience this week.",
    };

    format!(
        "Your dominant emotion this week was {}, appearing in {:.1}% of your entries. {} \
         Keep journaling to track your emotional journey and gain deeper insights!",
        dominant.emotion, dominant.percentage, stability
    )
}

/// User prompt for the insight request
pub fn build_insight_prompt(
    patterns: &[EmotionalPattern],
    mood_changes: &[MoodChange],
    texts: &[String],
) -> Result<String> {
    let entries = texts
        .iter()
        .map(|t| format!("- {}", t))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!(
        r#"Analyze the following journal entry data and provide personalized insights:

Emotional Patterns:
{}

Mood Changes:
{}

Journal Entries:
{}

Please provide:
1. A summary of emotional patterns and trends
2. Notable changes or shifts in mood
3. Personalized insights and observations
4. Gentle suggestions for emotional well-being

Format the response in a warm, supportive tone, as if you're a caring friend or therapist.
Keep the insights constructive and encouraging."#,
        serde_json::to_string_pretty(patterns)?,
        serde_json::to_string_pretty(mood_changes)?,
        entries
    ))
}

/// Builds weekly summaries from stored entries
pub struct WeeklyAggregator<'a> {
    db: &'a Database,
    ai: Option<&'a AIClient>,
    config: &'a InsightConfig,
}

impl<'a> WeeklyAggregator<'a> {
    pub fn new(db: &'a Database, ai: Option<&'a AIClient>, config: &'a InsightConfig) -> Self {
        Self { db, ai, config }
    }

    /// Inclusive window ending at `now`
    pub fn window(&self, now: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let start = Duration::try_days(self.config.window_days)
            .and_then(|span| now.checked_sub_signed(span))
            .ok_or_else(|| {
                Error::InvalidData(format!(
                    "Window of {} days is out of range",
                    self.config.window_days
                ))
            })?;
        Ok((start, now))
    }

    /// Summarize the user's last week
    pub async fn get_weekly_summary(&self, user_id: &str, now: DateTime<Utc>) -> Result<WeeklySummary> {
        let mut rng = StdRng::from_os_rng();
        self.get_weekly_summary_with_rng(user_id, now, &mut rng)
            .await
    }

    /// Same as [`get_weekly_summary`](Self::get_weekly_summary) with a caller-supplied random source
    pub async fn get_weekly_summary_with_rng<R: Rng + Send + ?Sized>(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<WeeklySummary> {
        let (start, end) = self.window(now)?;
        let entries = self.db.entries_in_window(user_id, start, end)?;
        info!(user_id = %user_id, entries = entries.len(), "Building weekly summary");

        let aggregation = aggregate(&entries);

        if aggregation.is_empty() {
            debug!(user_id = %user_id, "No entries in window");
            return Ok(WeeklySummary {
                emotional_patterns: vec![],
                key_themes: vec![],
                mood_changes: vec![],
                personalized_insights: empty_window_message(random_quote(rng)),
                period: "week".to_string(),
                start_date: start,
                end_date: end,
                is_ai: false,
            });
        }

        let (personalized_insights, is_ai) = self.insight_for(&aggregation).await;

        Ok(WeeklySummary {
            emotional_patterns: aggregation.patterns,
            key_themes: aggregation.key_themes,
            mood_changes: aggregation.mood_changes,
            personalized_insights,
            period: "week".to_string(),
            start_date: start,
            end_date: end,
            is_ai,
        })
    }

    /// Model insight when possible, template otherwise
    async fn insight_for(&self, aggregation: &Aggregation) -> (String, bool) {
        let Some(ai) = self.ai else {
            debug!("No AI backend configured, using template insight");
            return (
                fallback_insight(&aggregation.patterns, &aggregation.mood_changes),
                false,
            );
        };

        match self.request_insight(ai, aggregation).await {
            Ok(text) => (text, true),
            Err(e) => {
                warn!(error = %e, model = %ai.model(), "Insight generation failed, using template");
                (
                    fallback_insight(&aggregation.patterns, &aggregation.mood_changes),
                    false,
                )
            }
        }
    }

    async fn request_insight(&self, ai: &AIClient, aggregation: &Aggregation) -> Result<String> {
        let prompt = build_insight_prompt(
            &aggregation.patterns,
            &aggregation.mood_changes,
            &aggregation.texts,
        )?;
        let request = CompletionRequest::new(INSIGHT_PERSONA, prompt)
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens)
            .with_timeout(self.config.timeout);

        ai.complete(&request).await
    }
}
