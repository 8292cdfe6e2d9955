//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `repotrack`.
#[derive(Debug, Parser)]
#[command(
    name = "repotrack",
    version,
    about = "Extract tasks, progress and skills from a project checkout"
)]
pub struct Cli {
    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find the plan file and print its tasks and progress as JSON.
    Tasks {
        /// Checkout root.
        root: PathBuf,
        /// Plan file, relative to the root, tried before the defaults.
        #[arg(long)]
        plan: Option<String>,
        /// YAML configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the skills found in dependency manifests as JSON.
    Skills {
        /// Checkout root.
        root: PathBuf,
        /// YAML configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Run the full pipeline and print the report as JSON.
    Scan {
        /// Checkout root.
        root: PathBuf,
        /// Project UUID; a random one is generated when omitted.
        #[arg(long)]
        project_id: Option<String>,
        /// Repository URL recorded in the report.
        #[arg(long)]
        repo_url: Option<String>,
        /// Plan file, relative to the root, tried before the defaults.
        #[arg(long)]
        plan: Option<String>,
        /// YAML configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
