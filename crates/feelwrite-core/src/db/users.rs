//! User account operations

use chrono::Utc;
use rand::Rng;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use super::{format_datetime, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewUser, User, UserUpdate};

/// Hash a password with Argon2id and a random salt (PHC string format)
fn hash_password(password: &str) -> Result<String> {
    use argon2::{password_hash::SaltString, Argon2, PasswordHasher};

    let mut salt_bytes = [0u8; 16];
    rand::rng().fill(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| Error::Encryption(format!("Failed to create salt: {}", e)))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Encryption(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, stored: &str) -> bool {
    use argon2::{password_hash::PasswordHash, Argon2, PasswordVerifier};

    PasswordHash::new(stored)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(Error::InvalidData(format!("Invalid email address: '{}'", email)));
    }
    Ok(())
}

fn validate_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidData(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    let created_at: String = row.get(3)?;
    let updated_at: String = row.get(4)?;
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        username: row.get(2)?,
        created_at: parse_datetime(&created_at),
        updated_at: parse_datetime(&updated_at),
    })
}

impl Database {
    /// Register a new user
    ///
    /// Duplicate email or username yields `InvalidData`.
    pub fn create_user(&self, new_user: &NewUser) -> Result<User> {
        validate_email(&new_user.email)?;
        validate_non_empty("username", &new_user.username)?;
        validate_non_empty("password", &new_user.password)?;

        let email = new_user.email.trim();
        let username = new_user.username.trim();
        self.ensure_identity_free(email, username, None)?;

        let id = Uuid::new_v4().to_string();
        let now = format_datetime(&Utc::now());
        let password_hash = hash_password(&new_user.password)?;

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO users (id, email, username, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![id, email, username, password_hash, now, now],
        )?;
        drop(conn);

        self.get_user(&id)
    }

    /// Get a user by id
    pub fn get_user(&self, id: &str) -> Result<User> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, email, username, created_at, updated_at FROM users WHERE id = ?",
            params![id],
            row_to_user,
        )
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("User {}", id)))
    }

    /// Apply a partial update to a user
    pub fn update_user(&self, id: &str, update: &UserUpdate) -> Result<User> {
        let current = self.get_user(id)?;

        if let Some(ref email) = update.email {
            validate_email(email)?;
        }
        if let Some(ref username) = update.username {
            validate_non_empty("username", username)?;
        }
        if let Some(ref password) = update.password {
            validate_non_empty("password", password)?;
        }

        let email = update
            .email
            .as_deref()
            .map(str::trim)
            .unwrap_or(&current.email);
        let username = update
            .username
            .as_deref()
            .map(str::trim)
            .unwrap_or(&current.username);
        self.ensure_identity_free(email, username, Some(id))?;

        let now = format_datetime(&Utc::now());
        let conn = self.conn()?;
        conn.execute(
            "UPDATE users SET email = ?, username = ?, updated_at = ? WHERE id = ?",
            params![email, username, now, id],
        )?;

        if let Some(ref password) = update.password {
            let password_hash = hash_password(password)?;
            conn.execute(
                "UPDATE users SET password_hash = ? WHERE id = ?",
                params![password_hash, id],
            )?;
        }
        drop(conn);

        self.get_user(id)
    }

    /// Delete a user (journal entries are kept)
    pub fn delete_user(&self, id: &str) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM users WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("User {}", id)));
        }
        Ok(())
    }

    /// Check a password against the stored hash
    pub(crate) fn verify_user_password(&self, id: &str, password: &str) -> Result<bool> {
        let conn = self.conn()?;
        let stored: String = conn
            .query_row(
                "SELECT password_hash FROM users WHERE id = ?",
                params![id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("User {}", id)))?;
        Ok(verify_password(password, &stored))
    }

    /// Reject an email/username pair already used by another user
    fn ensure_identity_free(&self, email: &str, username: &str, exclude_id: Option<&str>) -> Result<()> {
        let conn = self.conn()?;
        let taken: i64 = conn.query_row(
            r#"
            SELECT COUNT(*) FROM users
            WHERE (email = ?1 COLLATE NOCASE OR username = ?2 COLLATE NOCASE)
              AND (?3 IS NULL OR id != ?3)
            "#,
            params![email, username, exclude_id],
            |row| row.get(0),
        )?;
        if taken > 0 {
            return Err(Error::InvalidData(
                "Email or username already registered".to_string(),
            ));
        }
        Ok(())
    }
}
