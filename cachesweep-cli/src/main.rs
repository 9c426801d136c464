//! cachesweep CLI - command-line interface
//!
//! This binary provides a command-line interface to the cachesweep
//! library: one-shot namespace clears, full sweeps, the periodic sweep
//! daemon, and directory-resolution inspection.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod error;

use commands::{clear, daemon, dirs};

#[derive(Parser)]
#[command(name = "cachesweep")]
#[command(version = cachesweep::VERSION)]
#[command(about = "Sweep bounded, age-limited disk caches", long_about = None)]
struct Args {
    /// Path to the roots document (default: ~/.cachesweep/roots.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clear one namespace now
    Clear {
        /// Cache namespace to clear
        namespace: String,

        /// Maximum file age in hours (0 disables the age rule)
        #[arg(long)]
        max_age_hours: Option<u64>,

        /// Maximum aggregate size in kilobytes (0 disables the size rule)
        #[arg(long)]
        max_size_kb: Option<u64>,
    },

    /// Sweep every configured namespace once
    Sweep,

    /// Run the periodic sweep daemon until interrupted
    Daemon {
        /// Seconds between sweeps
        #[arg(long, default_value_t = cachesweep::daemon::DEFAULT_SWEEP_INTERVAL_SECS)]
        interval_secs: u64,
    },

    /// Show the resolved directories of a namespace
    Dirs {
        /// Cache namespace to inspect
        namespace: String,
    },
}

fn main() {
    let args = Args::parse();
    let config = args.config.as_deref();

    let result = match args.command {
        Command::Clear {
            namespace,
            max_age_hours,
            max_size_kb,
        } => clear::run(config, &namespace, max_age_hours, max_size_kb),
        Command::Sweep => clear::run_all(config),
        Command::Daemon { interval_secs } => daemon::run(config, interval_secs),
        Command::Dirs { namespace } => dirs::run(config, &namespace),
    };

    if let Err(e) = result {
        e.exit();
    }
}
