//! Emotion taxonomy queries

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::{Error, Result};
use crate::models::{CategoryInfo, EmotionCategory, SubEmotion};

impl Database {
    /// List all emotion categories in taxonomy order
    pub fn list_categories(&self) -> Result<Vec<CategoryInfo>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, slug, name, description, color FROM emotion_categories ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<String>>(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows
            .into_iter()
            .filter_map(|(id, key, name, description, color)| {
                let category = key.parse::<EmotionCategory>().ok()?;
                Some(CategoryInfo {
                    id,
                    category,
                    name,
                    description,
                    color,
                })
            })
            .collect())
    }

    /// List sub-emotions, optionally restricted to one category
    pub fn list_sub_emotions(&self, category: Option<EmotionCategory>) -> Result<Vec<SubEmotion>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT s.id, s.name, c.slug, s.description, s.intensity
            FROM sub_emotions s
            JOIN emotion_categories c ON c.id = s.category_id
            WHERE (?1 IS NULL OR c.slug = ?1)
            ORDER BY c.id, s.id
            "#,
        )?;

        let key = category.map(|c| c.as_str());
        let rows = stmt
            .query_map(params![key], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, i32>(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows
            .into_iter()
            .filter_map(|(id, name, key, description, intensity)| {
                Some(SubEmotion {
                    id,
                    name,
                    category: key.parse().ok()?,
                    description,
                    intensity,
                })
            })
            .collect())
    }

    /// Look up a sub-emotion by name within a category (case-insensitive)
    ///
    /// Returns `InvalidData` when the name does not belong to the category.
    pub fn resolve_sub_emotion(&self, category: EmotionCategory, name: &str) -> Result<SubEmotion> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                r#"
                SELECT s.id, s.name, s.description, s.intensity
                FROM sub_emotions s
                JOIN emotion_categories c ON c.id = s.category_id
                WHERE c.slug = ? AND s.name = ? COLLATE NOCASE
                "#,
                params![category.as_str(), name.trim()],
                |row| {
                    Ok(SubEmotion {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        category,
                        description: row.get(2)?,
                        intensity: row.get(3)?,
                    })
                },
            )
            .optional()?;

        row.ok_or_else(|| {
            Error::InvalidData(format!(
                "Sub-emotion '{}' does not belong to category '{}'",
                name, category
            ))
        })
    }

    /// Database id of a category
    pub(crate) fn category_id(&self, category: EmotionCategory) -> Result<i64> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id FROM emotion_categories WHERE slug = ?",
            params![category.as_str()],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("Emotion category '{}'", category)))
    }
}
