//! Streaks and per-user statistics

use std::collections::HashMap;

use chrono::NaiveDate;
use rusqlite::params;

use super::Database;
use crate::error::Result;
use crate::models::{EmotionCategory, NamedCount, Reflection, StreakInfo, UserStats};

/// Compute streaks from ascending, de-duplicated check-in days
pub fn compute_streak(days: &[NaiveDate], today: NaiveDate) -> StreakInfo {
    let Some(&last) = days.last() else {
        return StreakInfo {
            current_streak: 0,
            longest_streak: 0,
            last_check_in_date: None,
        };
    };

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for &day in days {
        run = match prev {
            Some(p) if p.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }

    // The run ending at `last` only counts while it reaches today or yesterday
    let alive = last == today || last.succ_opt() == Some(today);

    StreakInfo {
        current_streak: if alive { run } else { 0 },
        longest_streak: longest,
        last_check_in_date: Some(last),
    }
}

impl Database {
    /// Distinct days on which the user wrote at least one entry, ascending
    fn check_in_days(&self, user_id: &str) -> Result<Vec<NaiveDate>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT DISTINCT substr(created_at, 1, 10) AS day
            FROM journal_entries
            WHERE user_id = ?
            ORDER BY day
            "#,
        )?;

        let days = stmt
            .query_map(params![user_id], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(days
            .iter()
            .filter_map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .collect())
    }

    /// Current and longest streak of consecutive journaling days
    pub fn user_streak(&self, user_id: &str, today: NaiveDate) -> Result<StreakInfo> {
        let days = self.check_in_days(user_id)?;
        Ok(compute_streak(&days, today))
    }

    /// Aggregate statistics for one user
    pub fn user_stats(&self, user_id: &str, today: NaiveDate) -> Result<UserStats> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT c.slug, COUNT(*)
            FROM journal_entries e
            JOIN emotion_categories c ON c.id = e.category_id
            WHERE e.user_id = ?
            GROUP BY c.slug
            "#,
        )?;
        let by_category: HashMap<String, u32> = stmt
            .query_map(params![user_id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<_, _>>()?;

        let emotions = EmotionCategory::all()
            .iter()
            .map(|c| NamedCount {
                name: c.as_str().to_string(),
                count: by_category.get(c.as_str()).copied().unwrap_or(0),
            })
            .collect();

        let mut stmt = conn.prepare(
            r#"
            SELECT sub_emotion, COUNT(*) AS n
            FROM journal_entries
            WHERE user_id = ?
            GROUP BY sub_emotion
            ORDER BY n DESC, sub_emotion ASC
            "#,
        )?;
        let sub_emotions = stmt
            .query_map(params![user_id], |row| {
                Ok(NamedCount {
                    name: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare("SELECT reflections FROM journal_entries WHERE user_id = ?")?;
        let stored = stmt
            .query_map(params![user_id], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut total_entries = 0u32;
        let mut total_reflections = 0u32;
        for json in &stored {
            total_entries += 1;
            let reflections: Vec<Reflection> = serde_json::from_str(json)?;
            total_reflections += reflections.len() as u32;
        }

        Ok(UserStats {
            total_entries,
            total_reflections,
            emotions,
            sub_emotions,
            streaks: self.user_streak(user_id, today)?,
        })
    }
}
