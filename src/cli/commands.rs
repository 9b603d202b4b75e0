//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bulletin")]
#[command(about = "Community newsletter submissions and editorial review", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Shared secret for the operation's role
    #[arg(long, global = true, env = "BULLETIN_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new newsletter store
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Day of the month submissions close (1-28)
        #[arg(short, long)]
        deadline_day: Option<i64>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Show the current collection month and next deadline
    Cycle,

    /// Submit an item for the newsletter
    Submit {
        /// Category (e.g., classifieds, events, parish-council)
        category: String,

        /// Submission text
        content: String,

        /// Name to credit in the newsletter
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List submissions relevant to an issue month
    List {
        /// Issue month (YYYY-MM, default: current collection month)
        #[arg(short, long)]
        month: Option<String>,

        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List backlogged submissions
    Backlog {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Set a submission's disposition (YYYY-MM, backlog or archived)
    Set {
        /// Submission id
        id: String,

        /// Target issue month, "backlog" or "archived"
        disposition: String,
    },

    /// Count relevant submissions per category
    Stats {
        /// Issue month (YYYY-MM, default: current collection month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List contributors credited in an issue
    Contributors {
        /// Issue month (YYYY-MM, default: current collection month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Print the starting draft for a section
    Draft {
        /// Category
        category: String,

        /// Issue month (YYYY-MM, default: current collection month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Save an edited draft for a section
    SaveDraft {
        /// Category
        category: String,

        /// Read the draft from this file (default: empty, clears the saved edit)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Mark the section complete
        #[arg(long)]
        complete: bool,
    },

    /// Show saved section progress
    Sections,

    /// Export newsletter text for an issue
    Export {
        /// Issue month (YYYY-MM, default: current collection month)
        #[arg(short, long)]
        month: Option<String>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export every submission and section as JSON
    ExportAll {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace all stored data from an export-all file
    Import {
        /// JSON file produced by export-all
        file: PathBuf,

        /// Required to apply the import
        #[arg(long)]
        yes: bool,
    },

    /// Maintenance procedures over stored submissions
    Repair {
        #[command(subcommand)]
        action: RepairAction,

        /// Print the plan without applying it
        #[arg(long, global = true)]
        dry_run: bool,

        /// Required to apply the plan
        #[arg(long, global = true)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum RepairAction {
    /// Rewrite legacy "published" dispositions to the submission's own month
    RetargetPublished,

    /// Move unreviewed submissions from one collection month to another
    MoveMonth {
        /// Collection month to move from (YYYY-MM)
        #[arg(long)]
        from: String,

        /// Collection month to move to (YYYY-MM)
        #[arg(long)]
        to: String,

        /// Only this kind (routine, community, committee)
        #[arg(long)]
        kind: Option<String>,
    },
}
