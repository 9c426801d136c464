//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent
//! formatting and appropriate exit codes.

use std::fmt;
use std::process;

use cachesweep::config::ConfigError;
use cachesweep::resolver::ResolveError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Failed to load the roots document
    Config(ConfigError),
    /// Failed to resolve or sweep a namespace
    Sweep(ResolveError),
    /// Failed to start the async runtime
    Runtime(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        if let CliError::Config(ConfigError::Missing(path)) = self {
            eprintln!();
            eprintln!("Create a roots document at {} like:", path.display());
            eprintln!();
            eprintln!("  [thumbnails]");
            eprintln!("  cache-root = images/thumbs");
            eprintln!("  max_age_hours = 24");
            eprintln!("  max_size_kb = 51200");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Sweep(e) => write!(f, "{}", e),
            CliError::Runtime(msg) => write!(f, "Failed to start runtime: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Sweep(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<ResolveError> for CliError {
    fn from(e: ResolveError) -> Self {
        CliError::Sweep(e)
    }
}
