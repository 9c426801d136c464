//! `daemon` command: run the periodic sweeper until interrupted.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use cachesweep::daemon::SweepDaemon;
use cachesweep::logging::{default_log_dir, default_log_file, init_logging};

use crate::error::CliError;

/// Run the sweep daemon until Ctrl-C.
pub fn run(config_path: Option<&Path>, interval_secs: u64) -> Result<(), CliError> {
    let _logging_guard = init_logging(default_log_dir(), default_log_file())
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    let sweeper = Arc::new(super::load_sweeper(config_path)?);

    let runtime = tokio::runtime::Runtime::new().map_err(|e| CliError::Runtime(e.to_string()))?;
    runtime.block_on(async {
        let daemon =
            SweepDaemon::new(sweeper).with_interval(Duration::from_secs(interval_secs));

        let shutdown = CancellationToken::new();
        let daemon_handle = tokio::spawn(daemon.run(shutdown.clone()));

        // Sweep until interrupted.
        let _ = tokio::signal::ctrl_c().await;
        shutdown.cancel();
        let _ = daemon_handle.await;
    });

    Ok(())
}
