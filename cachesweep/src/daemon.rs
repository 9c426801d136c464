//! Background sweep daemon.
//!
//! Periodically sweeps every configured namespace against its configured
//! limits. An initial sweep runs on startup, then one per interval until
//! cancellation.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use cachesweep::daemon::SweepDaemon;
//! use cachesweep::sweep::CacheSweeper;
//! use tokio_util::sync::CancellationToken;
//!
//! let daemon = SweepDaemon::new(Arc::new(sweeper));
//! let shutdown = CancellationToken::new();
//! tokio::spawn(daemon.run(shutdown));
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::sweep::CacheSweeper;

/// Default interval between sweeps (24 hours).
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Background daemon that periodically sweeps all configured namespaces.
pub struct SweepDaemon {
    sweeper: Arc<CacheSweeper>,
    interval: Duration,
}

impl SweepDaemon {
    /// Create a daemon with the default sweep interval.
    pub fn new(sweeper: Arc<CacheSweeper>) -> Self {
        Self {
            sweeper,
            interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }

    /// Set a custom sweep interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run until shutdown is signalled.
    ///
    /// Cancellation is only observed between sweeps, never mid-purge, so
    /// eviction bookkeeping always completes consistently.
    pub async fn run(self, shutdown: CancellationToken) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Sweep daemon starting"
        );

        let mut interval = tokio::time::interval(self.interval);
        // The first tick completes immediately; use it for the startup sweep.
        interval.tick().await;
        self.sweep_once().await;

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("Sweep daemon shutting down");
                    break;
                }

                _ = interval.tick() => {
                    self.sweep_once().await;
                }
            }
        }
    }

    /// Sweep all namespaces once, off the async runtime's worker threads.
    async fn sweep_once(&self) {
        let sweeper = Arc::clone(&self.sweeper);

        let result = tokio::task::spawn_blocking(move || sweeper.sweep_all()).await;

        match result {
            Ok(results) => {
                let namespaces = results.len();
                let files_deleted: u64 =
                    results.iter().map(|(_, s)| s.files_deleted()).sum();
                let bytes_freed: u64 = results.iter().map(|(_, s)| s.bytes_freed).sum();

                info!(namespaces, files_deleted, bytes_freed, "Sweep cycle complete");
            }
            Err(e) => error!(error = %e, "Sweep task panicked"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BasePaths, NamespaceSpec, RootEntry, RootKind, RootsConfig};
    use crate::engine::SweepLimits;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::SystemTime;
    use tempfile::TempDir;

    fn create_test_file(path: &Path, size: usize, age_secs: u64) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, vec![0u8; size]).unwrap();

        let mtime = SystemTime::now() - Duration::from_secs(age_secs);
        filetime::set_file_mtime(path, filetime::FileTime::from_system_time(mtime)).unwrap();
    }

    fn test_sweeper(temp_dir: &TempDir) -> Arc<CacheSweeper> {
        let bases = BasePaths {
            device: PathBuf::from("/"),
            files: temp_dir.path().join("files"),
            cache: temp_dir.path().join("cache"),
            external: temp_dir.path().join("external"),
        };
        let config = RootsConfig::new(vec![NamespaceSpec::new(
            "thumbs",
            vec![RootEntry::new(RootKind::CacheRoot, "thumbs")],
            SweepLimits::new(24, 0),
        )]);
        Arc::new(CacheSweeper::new(config, bases))
    }

    #[test]
    fn daemon_builder_defaults_and_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let daemon = SweepDaemon::new(test_sweeper(&temp_dir));
        assert_eq!(daemon.interval.as_secs(), DEFAULT_SWEEP_INTERVAL_SECS);

        let daemon = daemon.with_interval(Duration::from_secs(60));
        assert_eq!(daemon.interval.as_secs(), 60);
    }

    #[tokio::test]
    async fn daemon_respects_shutdown() {
        let temp_dir = TempDir::new().unwrap();
        let daemon =
            SweepDaemon::new(test_sweeper(&temp_dir)).with_interval(Duration::from_millis(100));

        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();
        let handle = tokio::spawn(daemon.run(shutdown_clone));

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.cancel();

        let result = tokio::time::timeout(Duration::from_secs(1), handle).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn daemon_sweeps_on_startup() {
        let temp_dir = TempDir::new().unwrap();
        let sweeper = test_sweeper(&temp_dir);
        let expired = temp_dir.path().join("cache/thumbs/expired.bin");
        create_test_file(&expired, 1024, 48 * 3600);

        let daemon = SweepDaemon::new(sweeper).with_interval(Duration::from_secs(3600));
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();
        let handle = tokio::spawn(daemon.run(shutdown_clone));

        // Give the startup sweep time to run, then stop the daemon.
        tokio::time::sleep(Duration::from_millis(200)).await;
        shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("daemon should stop promptly")
            .unwrap();

        assert!(!expired.exists());
    }
}
