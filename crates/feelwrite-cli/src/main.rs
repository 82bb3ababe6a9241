//! Feel-Write CLI - Emotional journaling backend
//!
//! Usage:
//!   feelwrite init                      Initialize database
//!   feelwrite entries add --user U ...  Write a journal entry
//!   feelwrite summary --user U          Weekly emotional summary
//!   feelwrite serve --port 3000         Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
        } => {
            let app_config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_serve(
                &cli.db,
                &host,
                port,
                no_auth,
                cli.no_encrypt,
                static_dir.as_deref(),
                app_config,
            )
            .await
        }
        Commands::Summary { user, json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let app_config = commands::load_config(cli.config.as_deref())?;
            let ai = feelwrite_core::AIClient::from_env();
            commands::cmd_summary(&db, &user, json, &app_config, ai.as_ref()).await
        }
        Commands::Entries { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_entries_list(&db, None, 20, 0),
                Some(EntriesAction::List { user, limit, skip }) => {
                    commands::cmd_entries_list(&db, user.as_deref(), limit, skip)
                }
                Some(EntriesAction::Show { id }) => commands::cmd_entries_show(&db, &id),
                Some(EntriesAction::Add {
                    user,
                    category,
                    sub_emotion,
                    text,
                    photo_url,
                }) => commands::cmd_entries_add(
                    &db,
                    &user,
                    &category,
                    &sub_emotion,
                    &text,
                    photo_url.as_deref(),
                ),
                Some(EntriesAction::Reflect {
                    id,
                    prompt,
                    response,
                }) => commands::cmd_entries_reflect(&db, &id, &prompt, &response),
            }
        }
        Commands::Emotions { category } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_emotions(&db, category.as_deref())
        }
        Commands::Prompts { category, random } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_prompts(&db, category.as_deref(), random)
        }
        Commands::Streak { user } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_streak(&db, &user)
        }
    }
}
