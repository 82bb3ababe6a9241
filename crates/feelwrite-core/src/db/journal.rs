//! Journal entry operations

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};
use tracing::warn;
use uuid::Uuid;

use super::{format_datetime, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{EmotionCategory, JournalEntry, NewJournalEntry, Reflection, WindowEntry};

/// Upper bound on page size for listings
pub const MAX_PAGE_SIZE: i64 = 1000;

const ENTRY_COLUMNS: &str = r#"
    e.id, e.user_id, c.slug, e.sub_emotion, e.text, e.photo_url,
    e.reflections, e.created_at, e.updated_at
"#;

/// Raw journal row before category and reflections are decoded
struct EntryRow {
    id: String,
    user_id: String,
    category: Option<String>,
    sub_emotion: String,
    text: String,
    photo_url: Option<String>,
    reflections: String,
    created_at: String,
    updated_at: String,
}

fn read_entry_row(row: &rusqlite::Row) -> rusqlite::Result<EntryRow> {
    Ok(EntryRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category: row.get(2)?,
        sub_emotion: row.get(3)?,
        text: row.get(4)?,
        photo_url: row.get(5)?,
        reflections: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

impl EntryRow {
    fn into_entry(self) -> Result<JournalEntry> {
        let category = self
            .category
            .as_deref()
            .and_then(|c| c.parse::<EmotionCategory>().ok())
            .ok_or_else(|| {
                Error::InvalidData(format!("Entry {} has an unknown emotion category", self.id))
            })?;
        let reflections: Vec<Reflection> = serde_json::from_str(&self.reflections)?;

        Ok(JournalEntry {
            id: self.id,
            user_id: self.user_id,
            category,
            sub_emotion: self.sub_emotion,
            text: self.text,
            photo_url: self.photo_url,
            reflections,
            created_at: parse_datetime(&self.created_at),
            updated_at: parse_datetime(&self.updated_at),
        })
    }
}

/// Decode listed rows, skipping (and logging) rows that cannot be decoded
fn decode_rows(rows: Vec<EntryRow>) -> Vec<JournalEntry> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id.clone();
            match row.into_entry() {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(entry_id = %id, error = %e, "Skipping undecodable journal entry");
                    None
                }
            }
        })
        .collect()
}

fn clamp_page(skip: i64, limit: i64) -> (i64, i64) {
    (skip.max(0), limit.clamp(0, MAX_PAGE_SIZE))
}

impl Database {
    /// Create a journal entry
    ///
    /// The sub-emotion must belong to the category; it is stored under its
    /// canonical taxonomy spelling.
    pub fn create_entry(&self, new_entry: &NewJournalEntry) -> Result<JournalEntry> {
        if new_entry.user_id.trim().is_empty() {
            return Err(Error::InvalidData("user_id must not be empty".into()));
        }
        if new_entry.text.trim().is_empty() {
            return Err(Error::InvalidData("Entry text must not be empty".into()));
        }

        let sub_emotion = self.resolve_sub_emotion(new_entry.category, &new_entry.sub_emotion)?;
        let category_id = self.category_id(new_entry.category)?;

        let id = Uuid::new_v4().to_string();
        let created_at = format_datetime(&new_entry.created_at.unwrap_or_else(Utc::now));

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO journal_entries
                (id, user_id, category_id, sub_emotion, text, photo_url, reflections, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, '[]', ?, ?)
            "#,
            params![
                id,
                new_entry.user_id.trim(),
                category_id,
                sub_emotion.name,
                new_entry.text,
                new_entry.photo_url,
                created_at,
                created_at,
            ],
        )?;
        drop(conn);

        self.get_entry(&id)
    }

    /// Get a journal entry by id
    pub fn get_entry(&self, id: &str) -> Result<JournalEntry> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                &format!(
                    r#"
                    SELECT {}
                    FROM journal_entries e
                    LEFT JOIN emotion_categories c ON c.id = e.category_id
                    WHERE e.id = ?
                    "#,
                    ENTRY_COLUMNS
                ),
                params![id],
                read_entry_row,
            )
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Journal entry {}", id)))?;

        row.into_entry()
    }

    /// List entries across all users, newest first
    pub fn list_entries(&self, skip: i64, limit: i64) -> Result<Vec<JournalEntry>> {
        let (skip, limit) = clamp_page(skip, limit);
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {}
            FROM journal_entries e
            LEFT JOIN emotion_categories c ON c.id = e.category_id
            ORDER BY e.created_at DESC, e.rowid DESC
            LIMIT ? OFFSET ?
            "#,
            ENTRY_COLUMNS
        ))?;

        let rows = stmt
            .query_map(params![limit, skip], read_entry_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(decode_rows(rows))
    }

    /// List one user's entries, newest first
    pub fn list_entries_for_user(
        &self,
        user_id: &str,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<JournalEntry>> {
        let (skip, limit) = clamp_page(skip, limit);
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {}
            FROM journal_entries e
            LEFT JOIN emotion_categories c ON c.id = e.category_id
            WHERE e.user_id = ?
            ORDER BY e.created_at DESC, e.rowid DESC
            LIMIT ? OFFSET ?
            "#,
            ENTRY_COLUMNS
        ))?;

        let rows = stmt
            .query_map(params![user_id, limit, skip], read_entry_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(decode_rows(rows))
    }

    /// Append a reflection to an entry and refresh its `updated_at`
    pub fn append_reflection(&self, id: &str, prompt: &str, response: &str) -> Result<JournalEntry> {
        if prompt.trim().is_empty() || response.trim().is_empty() {
            return Err(Error::InvalidData(
                "Reflection prompt and response must not be empty".into(),
            ));
        }

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let stored: String = tx
            .query_row(
                "SELECT reflections FROM journal_entries WHERE id = ?",
                params![id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Journal entry {}", id)))?;

        let now = Utc::now();
        let mut reflections: Vec<Reflection> = serde_json::from_str(&stored)?;
        reflections.push(Reflection {
            prompt: prompt.to_string(),
            response: response.to_string(),
            timestamp: now,
        });

        tx.execute(
            "UPDATE journal_entries SET reflections = ?, updated_at = ? WHERE id = ?",
            params![serde_json::to_string(&reflections)?, format_datetime(&now), id],
        )?;
        tx.commit()?;
        drop(conn);

        self.get_entry(id)
    }

    /// Entries for a user with `start <= created_at <= end`, in storage order
    ///
    /// Rows whose category no longer resolves come back with `category: None`.
    pub fn entries_in_window(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WindowEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT e.id, c.slug, e.text, e.created_at
            FROM journal_entries e
            LEFT JOIN emotion_categories c ON c.id = e.category_id
            WHERE e.user_id = ? AND e.created_at >= ? AND e.created_at <= ?
            ORDER BY e.rowid
            "#,
        )?;

        let entries = stmt
            .query_map(
                params![user_id, format_datetime(&start), format_datetime(&end)],
                |row| {
                    let category: Option<String> = row.get(1)?;
                    let created_at: String = row.get(3)?;
                    Ok(WindowEntry {
                        id: row.get(0)?,
                        category: category.and_then(|c| c.parse().ok()),
                        text: row.get(2)?,
                        created_at: parse_datetime(&created_at),
                    })
                },
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }
}
