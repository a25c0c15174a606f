use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ecoalertas", about = "Live filtered incident report feed")]
pub struct Cli {
    /// Only log errors
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
    /// Log merges and state changes
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the initial batch comes from and how it is filtered.
#[derive(Args, Debug, Clone, Default)]
pub struct FeedArgs {
    /// Read the initial batch from a JSON file instead of the HTTP API
    #[arg(long)]
    pub file: Option<String>,
    /// Backend base URL (overrides ECOALERTAS_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,
    /// Allowed category (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,
    /// Allowed status (repeatable)
    #[arg(long = "status")]
    pub statuses: Vec<String>,
    /// Case-insensitive text matched against description and category
    #[arg(long)]
    pub search: Option<String>,
    /// Start of date range, inclusive (YYYY-MM-DD or RFC3339)
    #[arg(long)]
    pub from: Option<String>,
    /// End of date range, inclusive (YYYY-MM-DD or RFC3339)
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the filtered view as JSON
    View {
        #[command(flatten)]
        feed: FeedArgs,
        /// Zero-based page index (requires --page-size)
        #[arg(long, requires = "page_size")]
        page: Option<usize>,
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Export the filtered view as CSV
    Export {
        #[command(flatten)]
        feed: FeedArgs,
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<String>,
    },
    /// Show available categories/statuses and counts for the filtered view
    Facets {
        #[command(flatten)]
        feed: FeedArgs,
    },
    /// Go live: merge line-delimited JSON reports from stdin until EOF or Ctrl-C
    Watch {
        #[command(flatten)]
        feed: FeedArgs,
        /// Push event name (overrides ECOALERTAS_EVENT)
        #[arg(long)]
        event: Option<String>,
    },
}
