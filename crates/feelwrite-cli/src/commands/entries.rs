//! Journal entry command implementations

use anyhow::{Context, Result};
use feelwrite_core::db::Database;
use feelwrite_core::models::{JournalEntry, NewJournalEntry};

use super::{parse_category, truncate};

pub fn cmd_entries_list(db: &Database, user: Option<&str>, limit: i64, skip: i64) -> Result<()> {
    let limit = limit.clamp(1, feelwrite_core::db::MAX_PAGE_SIZE);
    let skip = skip.max(0);
    let entries = match user {
        Some(user_id) => db.list_entries_for_user(user_id, skip, limit)?,
        None => db.list_entries(skip, limit)?,
    };

    if entries.is_empty() {
        println!("No journal entries found. Write one with:");
        println!("  feelwrite entries add --user <id> --category happy --sub-emotion Grateful --text \"...\"");
        return Ok(());
    }

    println!();
    println!("📓 Journal Entries");
    println!("   ─────────────────────────────────────────────────────────────");

    for entry in entries {
        println!(
            "   {} │ {:<8} │ {:<12} │ {}",
            entry.created_at.format("%Y-%m-%d %H:%M"),
            entry.category,
            entry.sub_emotion,
            truncate(&entry.text, 40)
        );
        println!("     id: {}", entry.id);
    }

    Ok(())
}

pub fn cmd_entries_show(db: &Database, id: &str) -> Result<()> {
    let entry = db
        .get_entry(id)
        .with_context(|| format!("Entry {} not found", id))?;
    print_entry(&entry);
    Ok(())
}

pub fn cmd_entries_add(
    db: &Database,
    user: &str,
    category: &str,
    sub_emotion: &str,
    text: &str,
    photo_url: Option<&str>,
) -> Result<()> {
    let category = parse_category(category)?;

    let entry = db
        .create_entry(&NewJournalEntry {
            user_id: user.to_string(),
            category,
            sub_emotion: sub_emotion.to_string(),
            text: text.to_string(),
            photo_url: photo_url.map(str::to_string),
            created_at: None,
        })
        .context("Failed to create entry")?;

    db.log_audit(
        "cli",
        "create",
        Some("journal_entry"),
        Some(&entry.id),
        Some(&format!("category={}, sub_emotion={}", entry.category, entry.sub_emotion)),
    )?;

    println!("✅ Entry saved: {}", entry.id);
    println!("   {} / {}", entry.category, entry.sub_emotion);

    Ok(())
}

pub fn cmd_entries_reflect(db: &Database, id: &str, prompt: &str, response: &str) -> Result<()> {
    let entry = db
        .append_reflection(id, prompt, response)
        .context("Failed to add reflection")?;

    db.log_audit(
        "cli",
        "reflect",
        Some("journal_entry"),
        Some(id),
        Some(&format!("reflections={}", entry.reflections.len())),
    )?;

    println!(
        "✅ Reflection added ({} total on this entry)",
        entry.reflections.len()
    );

    Ok(())
}

fn print_entry(entry: &JournalEntry) {
    println!();
    println!("📝 Entry {}", entry.id);
    println!("   User:     {}", entry.user_id);
    println!("   Emotion:  {} / {}", entry.category, entry.sub_emotion);
    println!("   Written:  {}", entry.created_at.format("%Y-%m-%d %H:%M"));
    if let Some(ref url) = entry.photo_url {
        println!("   Photo:    {}", url);
    }
    println!();
    println!("   {}", entry.text);

    if !entry.reflections.is_empty() {
        println!();
        println!("   Reflections");
        println!("   ─────────────────────────────");
        for reflection in &entry.reflections {
            println!("   Q: {}", reflection.prompt);
            println!("   A: {}", reflection.response);
            println!();
        }
    }
}
