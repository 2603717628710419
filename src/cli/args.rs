//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Reconstruct branch-and-bound search trees from tabular node dumps
#[derive(Parser, Debug)]
#[command(name = "bbforest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging. Multiple occurrences increase verbosity.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load every node table in a directory and summarize its forests
    Summary {
        /// Directory containing CSV node dumps
        #[arg(value_hint = ValueHint::DirPath)]
        source_dir: PathBuf,
    },

    /// Reconstruct one table and render its trees
    Tree {
        /// CSV node dump of a single solved instance
        #[arg(value_hint = ValueHint::FilePath)]
        source_path: PathBuf,
    },

    /// List the branching (internal) nodes of one table
    Branching {
        /// CSV node dump of a single solved instance
        #[arg(value_hint = ValueHint::FilePath)]
        source_path: PathBuf,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
