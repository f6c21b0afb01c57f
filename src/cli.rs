use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lifecycle manager for the ln2t-watchdog nightly scheduler
#[derive(Parser)]
#[command(name = "ln2t-watchdog-setup")]
#[command(about = "Install, remove, and inspect the ln2t-watchdog user service")]
#[command(version)]
pub struct Cli {
    /// Dry-run mode: announce each step without making changes.
    ///
    /// Mutating operations (pip install/uninstall, unit staging and removal,
    /// systemctl verbs) are skipped and logged. Read-only queries still run
    /// so the preview is realistic.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install the watchdog package and arm the nightly timer
    Install {
        /// Package source directory (default: discovered from the binary's location)
        #[arg(long)]
        package_dir: Option<PathBuf>,
    },
    /// Disable the timer, remove the staged units, and uninstall the package
    Uninstall,
    /// Report lifecycle state without changing anything
    Status {
        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
