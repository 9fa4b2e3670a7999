use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "melodiary-tui",
    version,
    about = "Terminal client for the Melodiary music library"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Backend base URL (default http://127.0.0.1:3000)
    #[arg(long, env = "MELODIARY_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Override the data directory (defaults to the OS data_local_dir)
    #[arg(long, env = "MELODIARY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the log directory (default `{data_dir}/logs`)
    #[arg(long, env = "MELODIARY_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Override the log filter (same syntax as RUST_LOG)
    #[arg(long, env = "MELODIARY_LOG_FILTER")]
    pub log_filter: Option<String>,

    /// Port for the local OAuth redirect listener
    #[arg(long, env = "MELODIARY_REDIRECT_PORT", default_value_t = 8888)]
    pub redirect_port: u16,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the TUI (default)
    Tui,

    /// Sync saved tracks from a platform into the library and print the report
    Sync {
        #[arg(long, default_value = "spotify")]
        platform: String,
    },

    /// Add a manually-entered track to the library
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        artist: String,

        #[arg(long)]
        album: String,

        #[arg(long)]
        cover_art_url: Option<String>,

        /// Duration in seconds
        #[arg(long)]
        duration: Option<i64>,

        #[arg(long)]
        release_year: Option<i32>,

        #[arg(long)]
        genre: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Forget the stored session
    Logout,
}
