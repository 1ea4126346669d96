//! CLI parse: clap types for listkit. No behavior; definitions only.

use crate::list::SortOrder;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// listkit CLI - browse paginated backend collections
#[derive(Debug, Parser)]
#[command(name = "listkit")]
#[command(about = "Browse paginated collections and manage a development login")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding listkit.toml
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch one or more pages of a collection
    List {
        /// Collection name, requested as /api/<resource>
        resource: String,
        /// Name search filter
        #[arg(long)]
        search: Option<String>,
        /// Sort field (defaults to config)
        #[arg(long)]
        sort_by: Option<String>,
        /// Sort direction: asc or desc
        #[arg(long)]
        order: Option<SortOrder>,
        /// Number of pages to fetch
        #[arg(long, default_value = "1")]
        pages: usize,
        /// Page size (defaults to config)
        #[arg(long)]
        limit: Option<u32>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Log in through the development login endpoint
    Login {
        /// Subject to log in as
        #[arg(long)]
        subject: Option<String>,
        /// Role to request (repeatable)
        #[arg(long = "role")]
        roles: Vec<String>,
    },
    /// Forget the stored credential
    Logout,
    /// Show the current login state
    Whoami,
    /// Show the backend configuration (requires the admin role)
    AdminConfig,
}
