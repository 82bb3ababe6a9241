//! Reflection prompt command implementations

use anyhow::Result;
use feelwrite_core::db::Database;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::parse_category;

pub fn cmd_prompts(db: &Database, category: Option<&str>, random: bool) -> Result<()> {
    let category = category.map(parse_category).transpose()?;

    if random {
        let mut rng = StdRng::from_os_rng();
        let prompt = db.random_prompt(category, &mut rng)?;
        println!("💭 {}", prompt.text);
        return Ok(());
    }

    let prompts = db.list_prompts(category)?;
    if prompts.is_empty() {
        println!("No prompts found.");
        return Ok(());
    }

    println!();
    println!("💭 Reflection Prompts");
    println!("   ─────────────────────────────────────────────────────────────");
    for prompt in prompts {
        let label = prompt
            .category
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("   [{:<7}] {}", label, prompt.text);
    }

    Ok(())
}
