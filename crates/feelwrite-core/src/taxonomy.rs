//! Fixed emotion taxonomy, reflection prompts and encouragement quotes
//!
//! These tables are seeded into the database by [`Database::seed_taxonomy`]
//! and are also used directly when no database is involved.
//!
//! [`Database::seed_taxonomy`]: crate::db::Database::seed_taxonomy

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::EmotionCategory;

/// Display metadata for a category: (name, description, color)
pub fn category_meta(category: EmotionCategory) -> (&'static str, &'static str, &'static str) {
    match category {
        EmotionCategory::Happy => ("Happy", "Positive, uplifting emotions", "#FCD34D"),
        EmotionCategory::Sad => ("Sad", "Emotions of loss and low mood", "#93C5FD"),
        EmotionCategory::Angry => ("Angry", "Emotions of frustration and conflict", "#FCA5A5"),
        EmotionCategory::Anxious => ("Anxious", "Emotions of worry and unease", "#C4B5FD"),
        EmotionCategory::Calm => ("Calm", "Emotions of peace and balance", "#86EFAC"),
    }
}

/// Sub-emotions per category with their intensity (1-10)
pub fn sub_emotions(category: EmotionCategory) -> &'static [(&'static str, i32)] {
    match category {
        EmotionCategory::Happy => &[
            ("Joyful", 8),
            ("Grateful", 7),
            ("Excited", 8),
            ("Content", 5),
            ("Proud", 7),
            ("Peaceful", 4),
            ("Hopeful", 6),
            ("Inspired", 7),
            ("Loved", 8),
            ("Cheerful", 6),
        ],
        EmotionCategory::Sad => &[
            ("Lonely", 6),
            ("Disappointed", 5),
            ("Hurt", 7),
            ("Grief", 9),
            ("Regretful", 6),
            ("Hopeless", 9),
            ("Melancholic", 5),
            ("Empty", 7),
            ("Heartbroken", 9),
            ("Vulnerable", 6),
        ],
        EmotionCategory::Angry => &[
            ("Frustrated", 5),
            ("Irritated", 4),
            ("Resentful", 6),
            ("Jealous", 6),
            ("Betrayed", 8),
            ("Furious", 10),
            ("Bitter", 6),
            ("Disgusted", 7),
            ("Outraged", 9),
            ("Hostile", 8),
        ],
        EmotionCategory::Anxious => &[
            ("Nervous", 5),
            ("Worried", 5),
            ("Stressed", 6),
            ("Insecure", 5),
            ("Fearful", 7),
            ("Panicked", 10),
            ("Uneasy", 4),
            ("Restless", 5),
            ("Doubtful", 4),
            ("Overwhelmed", 8),
        ],
        EmotionCategory::Calm => &[
            ("Relaxed", 5),
            ("Mindful", 5),
            ("Centered", 5),
            ("Balanced", 5),
            ("Serene", 6),
            ("Tranquil", 6),
            ("Peaceful", 6),
            ("Grounded", 5),
            ("Harmonious", 6),
            ("Soothed", 4),
        ],
    }
}

/// Whether `name` is a sub-emotion of `category` (case-insensitive)
pub fn is_sub_emotion_of(category: EmotionCategory, name: &str) -> bool {
    sub_emotions(category)
        .iter()
        .any(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
}

/// Reflection prompts per category
pub fn reflection_prompts(category: EmotionCategory) -> &'static [&'static str] {
    match category {
        EmotionCategory::Happy => &[
            "What made this moment special for you?",
            "How can you create more moments like this in your life?",
            "Who would you like to share this happiness with?",
            "What does this happiness teach you about what truly matters to you?",
            "How can you hold onto this feeling when facing challenges?",
            "What small actions could help you experience this feeling more often?",
            "How does this positive emotion affect your perspective on other areas of life?",
            "What strengths or qualities in yourself does this emotion highlight?",
            "If you could bottle this feeling, when would you choose to open it?",
            "What gratitude arises when you sit with this emotion?",
        ],
        EmotionCategory::Sad => &[
            "What would you say to a friend feeling this way?",
            "Is there a small comfort you could give yourself right now?",
            "What's one tiny step that might help you feel better?",
            "How have you moved through similar feelings in the past?",
            "What would feel like a gentle step forward from here?",
            "What does this sadness need most from you right now?",
            "Is there wisdom or insight hidden within this difficult feeling?",
            "How might this emotion be trying to guide or protect you?",
            "What boundaries might need to be set or respected?",
            "What would self-compassion look like in this moment?",
        ],
        EmotionCategory::Angry => &[
            "What's beneath this anger? Is there another emotion hiding there?",
            "What would help you release some of this tension?",
            "Is there a boundary you need to set with someone?",
            "What would resolution or peace look like in this situation?",
            "What wisdom might your anger be trying to share with you?",
            "How can you honor this feeling without being controlled by it?",
            "What needs of yours aren't being met in this situation?",
            "How might you channel this energy constructively?",
            "What would help you feel heard or understood?",
            "If your anger could speak, what would it say it needs?",
        ],
        EmotionCategory::Anxious => &[
            "What's one thing you can control in this situation?",
            "What would help you feel more grounded right now?",
            "What's the kindest thing you could do for yourself today?",
            "What's a more balanced perspective you could consider?",
            "What self-care practice might help ease this anxiety?",
            "What's the worst that could happen, and how would you cope?",
            "What small step would help you feel more secure?",
            "How can you bring more certainty to this uncertain situation?",
            "What has helped you manage similar feelings in the past?",
            "How might you create a moment of safety for yourself right now?",
        ],
        EmotionCategory::Calm => &[
            "How can you bring more of this peaceful feeling into your daily life?",
            "What conditions helped create this sense of calm?",
            "What insights come to you when you're in this centered state?",
            "How does this calmness affect how you see your challenges?",
            "What would you like to remember about this feeling?",
            "What practices help you maintain this sense of balance?",
            "How does your body feel different when you're in this state?",
            "What clarity or wisdom emerges from this place of stillness?",
            "How might you anchor yourself to return to this feeling later?",
            "What does this calm state reveal about what truly matters to you?",
        ],
    }
}

/// Positive quotes used when there is nothing to summarize
pub const POSITIVE_QUOTES: [&str; 15] = [
    "Every day is a new beginning. Take a deep breath and start again.",
    "You are stronger than you think, braver than you believe, and smarter than you know.",
    "The only way to do great work is to love what you do.",
    "Your present circumstances don't determine where you can go; they merely determine where you start.",
    "Believe you can and you're halfway there.",
    "The best way to predict your future is to create it.",
    "You are never too old to set another goal or to dream a new dream.",
    "Every moment is a fresh beginning.",
    "You are enough just as you are.",
    "The sun will rise and we will try again.",
    "Your potential is endless. Go do what you were created to do.",
    "Today is a perfect day to start something new.",
    "You are capable of amazing things.",
    "The only limit to our realization of tomorrow is our doubts of today.",
    "You are braver than you believe, stronger than you seem, and smarter than you think.",
];

/// Pick a quote uniformly at random
pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    // The list is a non-empty constant
    POSITIVE_QUOTES.choose(rng).copied().unwrap_or(POSITIVE_QUOTES[0])
}
