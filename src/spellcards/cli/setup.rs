use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spellcards", bin_name = "spellcards", version)]
#[command(about = "Paginate rule-text entries into printable index cards", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Directory holding config.json
    #[arg(
        long,
        global = true,
        env = "SPELLCARDS_HOME",
        value_name = "DIR",
        help_heading = "Options"
    )]
    pub config_dir: Option<PathBuf>,
}

/// Which entries are visible, replayed as intents in field order.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Facet group to filter with
    #[arg(long, value_name = "GROUP", help_heading = "Selection")]
    pub mode: Option<String>,

    /// Turn a facet's "Any" off, deselecting every value
    #[arg(long = "none", value_name = "FACET", help_heading = "Selection")]
    pub none: Vec<String>,

    /// Tick a facet value (e.g. --only level=3)
    #[arg(long, value_name = "FACET=VALUE", help_heading = "Selection")]
    pub only: Vec<String>,

    /// Untick a facet value
    #[arg(long, value_name = "FACET=VALUE", help_heading = "Selection")]
    pub exclude: Vec<String>,

    /// Toggle the pin of an entry
    #[arg(long, value_name = "ID", help_heading = "Selection")]
    pub pin: Vec<String>,

    /// Hide every entry that is not pinned
    #[arg(long, help_heading = "Selection")]
    pub hide_unpinned: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List visible entries
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Payload JSON file
        payload: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Show the facets of the active group and their selection
    #[command(display_order = 2)]
    Facets {
        /// Payload JSON file
        payload: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Show how entries split into pages
    #[command(display_order = 3)]
    Pages {
        /// Payload JSON file
        payload: PathBuf,

        /// Only this entry
        #[arg(short, long, value_name = "ID")]
        entry: Option<String>,
    },

    /// Write the HTML print sheet for the visible entries
    #[command(display_order = 4)]
    Print {
        /// Payload JSON file
        payload: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Get or set configuration
    #[command(display_order = 5)]
    Config {
        /// Configuration key (e.g., card-height)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
