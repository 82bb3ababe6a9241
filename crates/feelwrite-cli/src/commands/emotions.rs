//! Emotion taxonomy command implementations

use anyhow::Result;
use feelwrite_core::db::Database;

use super::parse_category;

/// List categories, or the sub-emotions of one category
pub fn cmd_emotions(db: &Database, category: Option<&str>) -> Result<()> {
    match category {
        Some(value) => {
            let category = parse_category(value)?;
            let subs = db.list_sub_emotions(Some(category))?;

            println!();
            println!("🎭 {} sub-emotions", category);
            println!("   ─────────────────────────────");
            for sub in subs {
                println!("   {:<14} intensity {:>2}/10", sub.name, sub.intensity);
            }
        }
        None => {
            let categories = db.list_categories()?;

            println!();
            println!("🎭 Emotion Categories");
            println!("   ─────────────────────────────────────────────");
            for info in categories {
                println!(
                    "   {:<8} {:<8} {}",
                    info.category,
                    info.color.as_deref().unwrap_or(""),
                    info.description.as_deref().unwrap_or("")
                );
            }
            println!();
            println!("   Use --category <name> to list its sub-emotions.");
        }
    }

    Ok(())
}
