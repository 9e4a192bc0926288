use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "readz", bin_name = "readz", version)]
#[command(about = "Track your reading progress through Power System Analysis & Design", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List chapters with overall progress
    #[command(alias = "ls")]
    List {
        /// Show notes under each chapter
        #[arg(long)]
        notes: bool,
    },

    /// Show one chapter with its notes
    #[command(alias = "v")]
    Show {
        /// Chapter id
        id: u64,
    },

    /// Add a custom chapter at the end of the list
    #[command(alias = "n")]
    Add {
        /// Chapter title
        title: String,

        /// Chapter number (defaults to list length + 1)
        #[arg(short, long)]
        number: Option<String>,

        /// Page range, e.g. 681-700
        #[arg(short, long)]
        pages: Option<String>,
    },

    /// Toggle completion of one or more chapters
    #[command(alias = "d")]
    Done {
        /// Chapter ids (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u64>,
    },

    /// Delete one or more chapters
    #[command(alias = "rm")]
    Delete {
        /// Chapter ids (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u64>,
    },

    /// Toggle notes edit mode of a chapter
    #[command(alias = "e")]
    Edit {
        /// Chapter id
        id: u64,
    },

    /// Replace the notes of a chapter ("" clears them)
    Notes {
        /// Chapter id
        id: u64,

        /// New notes text
        text: String,
    },

    /// Reset all progress to the default chapter list
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export progress as a JSON backup
    Export {
        /// Output file ("-" for stdout); defaults to the configured export filename
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace progress with a JSON backup
    Import {
        /// Backup file to read
        path: PathBuf,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., export-filename)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Interactive session with debounced saving
    Shell,
}
