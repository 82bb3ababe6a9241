//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_config` - Resolve feelwrite.toml
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use feelwrite_core::{db::Database, AppConfig};

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    tracing::debug!(path = %path_str, encrypted = !no_encrypt, "Opening database");
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Load the explicit config file if given, else the default override or embedded defaults
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(p) => AppConfig::load_from(p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => AppConfig::load().context("Failed to load configuration"),
    }
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;

    // Opening already seeds; repeat to report counts on an existing file
    db.seed_taxonomy().context("Failed to seed emotion taxonomy")?;
    let categories = db.list_categories()?;
    let sub_emotions = db.list_sub_emotions(None)?;
    let prompts = db.list_prompts(None)?;
    println!(
        "   Seeded {} categories, {} sub-emotions, {} prompts",
        categories.len(),
        sub_emotions.len(),
        prompts.len()
    );

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Write an entry: feelwrite entries add --user me --category happy --sub-emotion Grateful --text \"...\"");
    println!("  2. Start the API: feelwrite serve");

    Ok(())
}
