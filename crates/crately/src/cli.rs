//! Clap derive structures for the `crately` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crately_core::{SortField, SortOrder};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// crately -- warehouse inventory from the command line
#[derive(Debug, Parser)]
#[command(
    name = "crately",
    version,
    about = "Manage warehouse inventory from the command line",
    long_about = "A CLI for the crately inventory service.\n\n\
        Lists, creates, updates, and deletes inventory items over the\n\
        service's JSON REST API, with search, sorting, and pagination.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Service profile to use
    #[arg(long, short = 'p', env = "CRATELY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Service base URL (overrides profile)
    #[arg(long, short = 'u', env = "CRATELY_SERVICE", global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "CRATELY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "CRATELY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage inventory items
    #[command(alias = "i", alias = "item")]
    Items(ItemsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ITEMS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ItemsArgs {
    #[command(subcommand)]
    pub command: ItemsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ItemsCommand {
    /// List items with optional search, sort, and pagination
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a single item by id
    Get {
        /// Item id
        id: i64,
    },

    /// Create a new item
    #[command(alias = "create")]
    Add(ItemFieldArgs),

    /// Replace an existing item's fields
    #[command(alias = "edit")]
    Update {
        /// Item id
        id: i64,

        #[command(flatten)]
        fields: ItemFieldArgs,
    },

    /// Delete an item
    #[command(alias = "rm")]
    Delete {
        /// Item id
        id: i64,
    },
}

/// Search, sort, and pagination arguments for `items list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive substring match on name or category
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Sort field
    #[arg(long, default_value = "name")]
    pub sort: SortField,

    /// Sort direction
    #[arg(long, default_value = "asc")]
    pub order: SortOrder,

    /// Show one page (5 items) instead of the full list; out-of-range
    /// values clamp to the last page
    #[arg(long)]
    pub page: Option<usize>,
}

/// Field values for create and update. All four are required.
#[derive(Debug, Args)]
pub struct ItemFieldArgs {
    /// Item name
    #[arg(long)]
    pub name: String,

    /// Stock quantity (whole number, 0 or more)
    #[arg(long)]
    pub quantity: String,

    /// Unit price (0 or more)
    #[arg(long)]
    pub price: String,

    /// Category label
    #[arg(long)]
    pub category: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Create a config file with an interactive wizard
    Init,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
