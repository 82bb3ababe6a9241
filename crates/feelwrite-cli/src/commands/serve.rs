//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use feelwrite_core::AppConfig;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
    static_dir: Option<&Path>,
    app_config: AppConfig,
) -> Result<()> {
    println!("🚀 Starting Feel-Write server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    let mut config = feelwrite_server::ServerConfig::from_env();
    config.require_auth = !no_auth;

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else if config.api_keys.is_empty() {
        println!("   🔒 Authentication: no keys configured, set FEELWRITE_API_KEYS");
    } else {
        println!(
            "   🔑 API keys: {} configured (FEELWRITE_API_KEYS)",
            config.api_keys.len()
        );
    }
    if !config.allowed_origins.is_empty() {
        println!(
            "   🌐 CORS origins: {} (FEELWRITE_ALLOWED_ORIGINS)",
            config.allowed_origins.join(", ")
        );
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;

    let static_dir_str = static_dir
        .map(|p| p.to_str().context("static_dir path must be valid UTF-8"))
        .transpose()?;
    feelwrite_server::serve_with_config(db, host, port, static_dir_str, config, app_config).await?;

    Ok(())
}
