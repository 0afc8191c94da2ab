//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Terminal tray indicator for the NordVPN command-line client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Override config directory (default: `$XDG_CONFIG_HOME/nordtray` or `~/.config/nordtray`)
    #[arg(
        short = 'C',
        long,
        value_name = "DIR",
        env = "NORDTRAY_CONFIG_DIR",
        global = true
    )]
    pub config_dir: Option<PathBuf>,

    /// Subcommand to execute (default: run the tray)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe once and print the resulting display state
    Status {
        /// Print a single JSON object instead of text
        #[arg(long)]
        json: bool,
    },
    /// Poll continuously and print one JSON line per update
    Watch,
}
