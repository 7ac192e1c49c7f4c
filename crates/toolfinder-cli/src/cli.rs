//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use toolfinder_extractor::DiscoveryKind;

/// Toolfinder CLI - Discover AI tools through a chat service.
#[derive(Debug, Parser)]
#[command(name = "toolfinder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TOOLFINDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Profile to use for discovery in this run (not saved)
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Chat endpoint, overriding the profile
    #[arg(long, global = true, env = "TOOLFINDER_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Chat model, overriding the profile
    #[arg(long, global = true, env = "TOOLFINDER_MODEL")]
    pub model: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (names only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract tool records from a saved chat reply
    Extract(ExtractArgs),

    /// Ask the chat service for tools and extract them
    Discover(DiscoverArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// File containing the reply text
    #[arg(long, conflicts_with = "stdin")]
    pub file: Option<PathBuf>,

    /// Read the reply text from stdin
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for the discover command.
#[derive(Debug, Parser)]
pub struct DiscoverArgs {
    /// What to discover
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Search query (required for `search`)
    pub query: Option<String>,

    /// Number of tools to ask for
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Restrict to one category
    #[arg(long)]
    pub category: Option<String>,
}

/// Discovery kind argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum KindArg {
    /// Standout tools across categories
    Featured,
    /// Tools popular right now
    Trending,
    /// Tools released in the past week
    New,
    /// Tools matching a query
    Search,
}

impl DiscoverArgs {
    /// Resolve the kind and query into a discovery kind.
    pub fn discovery_kind(&self) -> Option<DiscoveryKind> {
        match self.kind {
            KindArg::Featured => Some(DiscoveryKind::Featured),
            KindArg::Trending => Some(DiscoveryKind::Trending),
            KindArg::New => Some(DiscoveryKind::New),
            KindArg::Search => self
                .query
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(|q| DiscoveryKind::Search(q.to_string())),
        }
    }
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Chat endpoint URL
        endpoint: String,
        /// Chat model
        model: String,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
