//! Domain models for Feel-Write

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Top-level emotion category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionCategory {
    Happy,
    Sad,
    Angry,
    Anxious,
    Calm,
}

impl EmotionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Anxious => "anxious",
            Self::Calm => "calm",
        }
    }

    /// All categories in taxonomy order
    pub fn all() -> &'static [EmotionCategory] {
        &[
            Self::Happy,
            Self::Sad,
            Self::Angry,
            Self::Anxious,
            Self::Calm,
        ]
    }
}

impl std::str::FromStr for EmotionCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" => Ok(Self::Happy),
            "sad" => Ok(Self::Sad),
            "angry" => Ok(Self::Angry),
            "anxious" => Ok(Self::Anxious),
            "calm" => Ok(Self::Calm),
            _ => Err(format!("Unknown emotion category: {}", s)),
        }
    }
}

impl std::fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An emotion category as stored in the taxonomy tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub id: i64,
    pub category: EmotionCategory,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// A sub-emotion belonging to one category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubEmotion {
    pub id: i64,
    pub name: String,
    pub category: EmotionCategory,
    pub description: Option<String>,
    /// 1-10
    pub intensity: i32,
}

/// A reflection prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: i64,
    pub text: String,
    pub category: Option<EmotionCategory>,
    pub is_active: bool,
}

/// A reflection appended to a journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    pub prompt: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// A journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub user_id: String,
    pub category: EmotionCategory,
    pub sub_emotion: String,
    pub text: String,
    pub photo_url: Option<String>,
    pub reflections: Vec<Reflection>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJournalEntry {
    pub user_id: String,
    pub category: EmotionCategory,
    pub sub_emotion: String,
    pub text: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Explicit creation time (defaults to now)
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A journal entry as seen by the weekly aggregator
///
/// `category` is `None` when the stored category id no longer resolves
/// against the taxonomy.
#[derive(Debug, Clone)]
pub struct WindowEntry {
    pub id: String,
    pub category: Option<EmotionCategory>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A registered user (password hash never leaves the db layer)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a user
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Partial user update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Count and share of one emotion within a window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalPattern {
    pub emotion: String,
    pub count: u32,
    pub percentage: f64,
}

/// One timeline sample per entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodChange {
    pub date: DateTime<Utc>,
    pub emotion: String,
    pub intensity: f64,
}

/// Weekly emotional summary for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub emotional_patterns: Vec<EmotionalPattern>,
    pub key_themes: Vec<String>,
    pub mood_changes: Vec<MoodChange>,
    pub personalized_insights: String,
    pub period: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Whether the insight text came from the language model
    #[serde(rename = "isAI")]
    pub is_ai: bool,
}

/// Journaling streak information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakInfo {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_check_in_date: Option<NaiveDate>,
}

/// Name/count pair used in stats breakdowns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedCount {
    pub name: String,
    pub count: u32,
}

/// Aggregate statistics for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_entries: u32,
    pub total_reflections: u32,
    /// Per-category counts in taxonomy order (zero-filled)
    pub emotions: Vec<NamedCount>,
    /// Per-sub-emotion counts, most frequent first
    pub sub_emotions: Vec<NamedCount>,
    pub streaks: StreakInfo,
}

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub user_email: String,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub details: Option<String>,
}
