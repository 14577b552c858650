//! CLI argument parsing module for snapup

use clap::Parser;
use std::path::PathBuf;

/// Audit snapcraft part pins against their upstream repositories
#[derive(Parser, Debug, Clone)]
#[command(
    name = "snapup",
    version,
    about = "Check whether the tags and branches pinned in snapcraft.yaml are up to date"
)]
pub struct CliArgs {
    /// snapcraft.yaml file, or a directory containing it (or snap/snapcraft.yaml)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Audit only these parts, in the given order
    pub parts: Vec<String>,

    /// Do not contact any repository host
    #[arg(short = 's', long)]
    pub no_fetch: bool,

    /// Credentials file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output (debug logging)
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - no progress display
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Progress is drawn only for interactive text output
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Default tracing filter for this invocation
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "snapup=debug"
        } else {
            "snapup=warn"
        }
    }
}
