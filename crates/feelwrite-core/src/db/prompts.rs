//! Reflection prompt queries

use rand::seq::IndexedRandom;
use rand::Rng;
use rusqlite::params;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{EmotionCategory, Prompt};

/// Category used when a caller does not name one
pub const DEFAULT_PROMPT_CATEGORY: EmotionCategory = EmotionCategory::Anxious;

impl Database {
    /// List active prompts, optionally restricted to one category
    pub fn list_prompts(&self, category: Option<EmotionCategory>) -> Result<Vec<Prompt>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT p.id, p.text, c.slug, p.is_active
            FROM prompts p
            LEFT JOIN emotion_categories c ON c.id = p.category_id
            WHERE p.is_active = 1 AND (?1 IS NULL OR c.slug = ?1)
            ORDER BY p.id
            "#,
        )?;

        let key = category.map(|c| c.as_str());
        let prompts = stmt
            .query_map(params![key], |row| {
                let key: Option<String> = row.get(2)?;
                Ok(Prompt {
                    id: row.get(0)?,
                    text: row.get(1)?,
                    category: key.and_then(|k| k.parse().ok()),
                    is_active: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(prompts)
    }

    /// Pick one active prompt for the category uniformly at random
    pub fn random_prompt<R: Rng + ?Sized>(
        &self,
        category: Option<EmotionCategory>,
        rng: &mut R,
    ) -> Result<Prompt> {
        let category = category.unwrap_or(DEFAULT_PROMPT_CATEGORY);
        let prompts = self.list_prompts(Some(category))?;
        prompts
            .choose(rng)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("No prompts for category '{}'", category)))
    }
}
