//! CLI argument definitions using clap
//!
//! The command implementations live in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Feel-Write - Emotional journaling with weekly insights
#[derive(Parser)]
#[command(name = "feelwrite")]
#[command(about = "Self-hosted emotional journaling backend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "feelwrite.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set FEELWRITE_DB_KEY environment variable with your passphrase.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// Path to a feelwrite.toml override
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and seed the emotion taxonomy
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, every request needs a bearer key from FEELWRITE_API_KEYS.
        #[arg(long)]
        no_auth: bool,

        /// Directory containing static files to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Show the weekly emotional summary for a user
    Summary {
        /// User id
        #[arg(short, long)]
        user: String,

        /// Print the raw JSON summary
        #[arg(long)]
        json: bool,
    },

    /// Manage journal entries
    Entries {
        #[command(subcommand)]
        action: Option<EntriesAction>,
    },

    /// List emotion categories, or the sub-emotions of one category
    Emotions {
        /// Category to list sub-emotions for
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List reflection prompts
    Prompts {
        /// Only prompts for this category
        #[arg(short, long)]
        category: Option<String>,

        /// Pick one prompt at random (defaults to the anxious category)
        #[arg(long)]
        random: bool,
    },

    /// Show a user's journaling streak
    Streak {
        /// User id
        #[arg(short, long)]
        user: String,
    },
}

#[derive(Subcommand)]
pub enum EntriesAction {
    /// List entries, newest first
    List {
        /// Only entries for this user
        #[arg(short, long)]
        user: Option<String>,

        /// Maximum number of entries
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Number of entries to skip
        #[arg(long, default_value = "0")]
        skip: i64,
    },

    /// Show one entry with its reflections
    Show {
        /// Entry id
        id: String,
    },

    /// Add an entry
    Add {
        /// User id
        #[arg(short, long)]
        user: String,

        /// Emotion category (happy, sad, angry, anxious, calm)
        #[arg(short, long)]
        category: String,

        /// Sub-emotion within the category (e.g., Grateful)
        #[arg(short, long)]
        sub_emotion: String,

        /// Entry text
        #[arg(short, long)]
        text: String,

        /// Optional photo URL
        #[arg(long)]
        photo_url: Option<String>,
    },

    /// Append a reflection to an entry
    Reflect {
        /// Entry id
        id: String,

        /// The prompt being answered
        #[arg(short, long)]
        prompt: String,

        /// Your response
        #[arg(short, long)]
        response: String,
    },
}
