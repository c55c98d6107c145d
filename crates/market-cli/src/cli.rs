//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use market_fs::{JsonStore, WriteMode};
use market_meta::{Category, Price};

/// Extension marketplace registry tools
#[derive(Parser, Debug)]
#[command(name = "market")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding registry.json and providers.json
    #[arg(long, global = true, env = "MARKET_ROOT", default_value = "public")]
    pub root: PathBuf,

    /// Registry file (defaults to <root>/registry.json)
    #[arg(long, global = true)]
    pub registry: Option<PathBuf>,

    /// Providers file (defaults to <root>/providers.json)
    #[arg(long, global = true)]
    pub providers: Option<PathBuf>,

    /// JSON object of extra provider name -> id entries
    #[arg(long, global = true)]
    pub provider_map: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by the commands that rewrite registry files.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteArgs {
    /// Write through a temp file and rename instead of overwriting in place
    #[arg(long)]
    pub atomic: bool,

    /// Print the summary without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl WriteArgs {
    /// Store honoring `--atomic`.
    pub fn store(self) -> JsonStore {
        if self.atomic {
            JsonStore::with_mode(WriteMode::Atomic)
        } else {
            JsonStore::new()
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Replace embedded provider objects with provider_id
    ///
    /// Safe to run more than once.
    Convert {
        #[command(flatten)]
        write: WriteArgs,
    },

    /// Split embedded providers out of a legacy registry into providers.json
    ExtractProviders {
        #[command(flatten)]
        write: WriteArgs,
    },

    /// Detect providers for extensions whose provider_id is "unknown"
    FixProviders {
        #[command(flatten)]
        write: WriteArgs,
    },

    /// List extensions
    ///
    /// Examples:
    ///   market list --search xblock
    ///   market list --category courseware-native --compat quince
    ///   market list --page 2 --json
    List {
        /// Case-insensitive text over name, summary and provider
        #[arg(short, long)]
        search: Option<String>,

        /// Category slug
        #[arg(short, long, value_parser = parse_category)]
        category: Option<Category>,

        /// Platform release the extension must support
        #[arg(long)]
        compat: Option<String>,

        /// Exact license
        #[arg(long)]
        license: Option<String>,

        /// free or paid
        #[arg(long, value_parser = parse_price)]
        price: Option<Price>,

        /// Exact provider name
        #[arg(long)]
        provider: Option<String>,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Exported review records to overlay ratings from
        #[arg(long)]
        reviews: Option<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show one extension
    Show {
        /// Extension slug
        slug: String,

        /// Exported review records to overlay ratings from
        #[arg(long)]
        reviews: Option<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

fn parse_category(value: &str) -> Result<Category, String> {
    Category::parse(value).ok_or_else(|| {
        let valid: Vec<_> = Category::ALL.iter().map(|c| c.as_str()).collect();
        format!("unknown category '{value}'. Valid: {}", valid.join(", "))
    })
}

fn parse_price(value: &str) -> Result<Price, String> {
    Price::parse(value).ok_or_else(|| format!("unknown price '{value}'. Valid: free, paid"))
}
