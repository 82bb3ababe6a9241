//! Database access layer with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `emotions` - Category and sub-emotion taxonomy
//! - `prompts` - Reflection prompts
//! - `users` - User accounts
//! - `journal` - Journal entries and reflections
//! - `stats` - Streaks and per-user statistics
//! - `audit` - Audit log

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::EmotionCategory;
use crate::taxonomy;

mod audit;
mod emotions;
mod journal;
mod prompts;
mod stats;
mod users;

pub use journal::MAX_PAGE_SIZE;
pub use prompts::DEFAULT_PROMPT_CATEGORY;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Environment variable for database encryption key
pub const DB_KEY_ENV: &str = "FEELWRITE_DB_KEY";

/// Storage format for timestamps
///
/// Fixed-width nanoseconds keep text comparison in time order.
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f";

/// Parse format; the fraction is optional (SQLite `CURRENT_TIMESTAMP` has none)
const DATETIME_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Derive an encryption key from a passphrase using Argon2
///
/// Uses a fixed application salt so the same passphrase always produces the same key,
/// regardless of database path.
fn derive_key(passphrase: &str) -> Result<String> {
    use argon2::{password_hash::SaltString, Argon2, PasswordHasher};

    // Changing this invalidates every existing encrypted database
    const APP_SALT: &[u8; 16] = b"feelwrite-salt-1";

    let salt = SaltString::encode_b64(APP_SALT)
        .map_err(|e| Error::Encryption(format!("Failed to create salt: {}", e)))?;

    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(passphrase.as_bytes(), &salt)
        .map_err(|e| Error::Encryption(format!("Failed to derive key: {}", e)))?;

    let hash_str = hash
        .hash
        .ok_or_else(|| Error::Encryption("No hash output".to_string()))?;
    Ok(hex::encode(hash_str.as_bytes()))
}

/// Format a timestamp for storage
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// Parse a stored datetime string into a DateTime<Utc>
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    chrono::NaiveDateTime::parse_from_str(s, DATETIME_PARSE_FORMAT)
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    db_path: String,
}

impl Database {
    /// Create a new database connection pool with encryption
    ///
    /// Requires `FEELWRITE_DB_KEY` to be set. Use `new_unencrypted()` for
    /// development or testing without encryption.
    pub fn new(path: &str) -> Result<Self> {
        match std::env::var(DB_KEY_ENV).ok() {
            Some(key) => Self::new_with_key(path, Some(&key)),
            None => Err(Error::Encryption(format!(
                "Database encryption required. Set {} environment variable with your passphrase, \
                or use --no-encrypt for unencrypted databases (not recommended for production).",
                DB_KEY_ENV
            ))),
        }
    }

    /// Create a new unencrypted database connection pool
    pub fn new_unencrypted(path: &str) -> Result<Self> {
        Self::new_with_key(path, None)
    }

    /// Create a new database with an explicit encryption key
    pub fn new_with_key(path: &str, passphrase: Option<&str>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);

        let pool = if let Some(pass) = passphrase {
            let key = derive_key(pass)?;
            let key_pragma = format!("PRAGMA key = 'x\"{}\"';", key);

            let manager = manager.with_init(move |conn| {
                conn.execute_batch(&key_pragma)?;
                Ok(())
            });

            Pool::builder().max_size(10).build(manager)?
        } else {
            Pool::builder().max_size(10).build(manager)?
        };

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;
        db.seed_taxonomy()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Uses a temporary file rather than `:memory:` because each pooled
    /// connection would otherwise see its own empty database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "feelwrite_test_{}_{}.db",
            std::process::id(),
            id
        ));
        let path = path.to_string_lossy().to_string();

        let _ = std::fs::remove_file(&path);

        Self::new_unencrypted(&path)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            CREATE TABLE IF NOT EXISTS emotion_categories (
                id INTEGER PRIMARY KEY,
                slug TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                description TEXT,
                color TEXT
            );

            CREATE TABLE IF NOT EXISTS sub_emotions (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                category_id INTEGER NOT NULL REFERENCES emotion_categories(id),
                description TEXT,
                intensity INTEGER NOT NULL CHECK (intensity BETWEEN 1 AND 10),
                UNIQUE(name, category_id)
            );

            CREATE TABLE IF NOT EXISTS prompts (
                id INTEGER PRIMARY KEY,
                text TEXT NOT NULL,
                category_id INTEGER REFERENCES emotion_categories(id),
                is_active INTEGER NOT NULL DEFAULT 1,
                UNIQUE(text, category_id)
            );

            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            -- No foreign key on category_id: unresolved rows are skipped by the aggregator
            CREATE TABLE IF NOT EXISTS journal_entries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                category_id INTEGER NOT NULL,
                sub_emotion TEXT NOT NULL,
                text TEXT NOT NULL,
                photo_url TEXT,
                reflections TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_journal_user_created
                ON journal_entries(user_id, created_at);

            CREATE TABLE IF NOT EXISTS audit_log (
                id INTEGER PRIMARY KEY,
                timestamp TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                user_email TEXT NOT NULL,
                action TEXT NOT NULL,
                entity_type TEXT,
                entity_id TEXT,
                details TEXT
            );
            "#,
        )?;

        Ok(())
    }

    /// Insert the fixed taxonomy: categories, sub-emotions and reflection prompts
    ///
    /// Idempotent; existing rows are left alone.
    pub fn seed_taxonomy(&self) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let mut inserted = 0usize;
        for category in EmotionCategory::all() {
            let (name, description, color) = taxonomy::category_meta(*category);
            inserted += tx.execute(
                "INSERT OR IGNORE INTO emotion_categories (slug, name, description, color) VALUES (?, ?, ?, ?)",
                params![category.as_str(), name, description, color],
            )?;

            let category_id: i64 = tx.query_row(
                "SELECT id FROM emotion_categories WHERE slug = ?",
                params![category.as_str()],
                |row| row.get(0),
            )?;

            for (sub, intensity) in taxonomy::sub_emotions(*category) {
                inserted += tx.execute(
                    "INSERT OR IGNORE INTO sub_emotions (name, category_id, intensity) VALUES (?, ?, ?)",
                    params![sub, category_id, intensity],
                )?;
            }

            for text in taxonomy::reflection_prompts(*category) {
                inserted += tx.execute(
                    "INSERT OR IGNORE INTO prompts (text, category_id) VALUES (?, ?)",
                    params![text, category_id],
                )?;
            }
        }

        tx.commit()?;

        if inserted > 0 {
            info!(rows = inserted, "Seeded emotion taxonomy");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
