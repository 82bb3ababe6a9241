//! Weekly summary and streak command implementations

use anyhow::{Context, Result};
use chrono::Utc;
use feelwrite_core::db::Database;
use feelwrite_core::models::WeeklySummary;
use feelwrite_core::{AIClient, AppConfig, WeeklyAggregator};

pub async fn cmd_summary(
    db: &Database,
    user: &str,
    json: bool,
    config: &AppConfig,
    ai: Option<&AIClient>,
) -> Result<()> {
    let aggregator = WeeklyAggregator::new(db, ai, &config.insights);
    let summary = aggregator
        .get_weekly_summary(user, Utc::now())
        .await
        .context("Failed to build weekly summary")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_summary(&summary));
    }

    Ok(())
}

/// Human-readable rendering of a weekly summary
pub fn format_summary(summary: &WeeklySummary) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!(
        "📅 Weekly Summary ({} → {})\n",
        summary.start_date.format("%Y-%m-%d"),
        summary.end_date.format("%Y-%m-%d")
    ));
    out.push_str("   ─────────────────────────────\n");

    if summary.emotional_patterns.is_empty() {
        out.push_str("   No entries this week.\n");
    } else {
        for pattern in &summary.emotional_patterns {
            out.push_str(&format!(
                "   {:<8} {:>3} entries  {:>5.1}%\n",
                pattern.emotion, pattern.count, pattern.percentage
            ));
        }
    }

    if !summary.key_themes.is_empty() {
        out.push('\n');
        out.push_str(&format!("   Themes: {}\n", summary.key_themes.join(", ")));
    }

    out.push('\n');
    let source = if summary.is_ai { "🤖" } else { "💡" };
    out.push_str(&format!("{} {}\n", source, summary.personalized_insights));
    out
}

pub fn cmd_streak(db: &Database, user: &str) -> Result<()> {
    let streak = db.user_streak(user, Utc::now().date_naive())?;

    match streak.last_check_in_date {
        Some(last) => {
            println!("🔥 Current streak: {} day(s)", streak.current_streak);
            println!("   Longest streak: {} day(s)", streak.longest_streak);
            println!("   Last check-in:  {}", last);
        }
        None => {
            println!("No entries yet for {}. Start today!", user);
        }
    }

    Ok(())
}
