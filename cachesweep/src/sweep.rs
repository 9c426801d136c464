//! The public sweep facade.
//!
//! [`CacheSweeper`] ties the pieces together: it resolves a namespace's
//! directories (memoized), streams their files through the eviction
//! engine, and returns a [`SweepSummary`]. Overlapping `clear` calls for
//! the same namespace are serialized with a per-namespace lock; different
//! namespaces never contend.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use tracing::{debug, info};

use crate::config::{BasePaths, ConfigError, RootsConfig};
use crate::engine::{self, SweepLimits, SweepSummary};
use crate::resolver::{DirectoryResolver, ResolveError};

/// Drives cache sweeps across configured namespaces.
pub struct CacheSweeper {
    resolver: DirectoryResolver,
    /// Per-namespace locks serializing overlapping `clear` calls.
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl CacheSweeper {
    /// Create a sweeper over a parsed roots document and base paths.
    pub fn new(config: RootsConfig, bases: BasePaths) -> Self {
        Self {
            resolver: DirectoryResolver::new(config, bases),
            locks: DashMap::new(),
        }
    }

    /// Create a sweeper by loading the roots document from a file.
    pub fn from_file(path: &std::path::Path, bases: BasePaths) -> Result<Self, ConfigError> {
        let config = RootsConfig::load_from(path)?;
        Ok(Self::new(config, bases))
    }

    /// The underlying directory resolver.
    pub fn resolver(&self) -> &DirectoryResolver {
        &self.resolver
    }

    /// Clear one namespace against explicit limits.
    ///
    /// Resolves the namespace's directories, deletes files older than the
    /// age limit, then evicts the highest-scoring survivors until the
    /// aggregate size fits the budget. A namespace that resolves to zero
    /// directories yields an empty summary, not an error. Individual file
    /// deletion failures are counted in the summary, never raised.
    pub fn clear(
        &self,
        namespace: &str,
        limits: &SweepLimits,
    ) -> Result<SweepSummary, ResolveError> {
        let lock = self
            .locks
            .entry(namespace.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let dirs = self.resolver.resolve(namespace)?;
        let summary = engine::sweep_directories(&dirs, limits);

        info!(
            namespace,
            files_scanned = summary.files_scanned,
            age_evicted = summary.age_evicted,
            size_evicted = summary.size_evicted,
            delete_failures = summary.delete_failures,
            bytes_freed = summary.bytes_freed,
            remaining_bytes = summary.remaining_bytes,
            residual_bytes = summary.residual_bytes(limits),
            duration_ms = summary.duration_ms,
            "Cache sweep complete"
        );

        Ok(summary)
    }

    /// Clear one namespace using the limits from the roots document.
    ///
    /// Namespaces without configured limits get the disabled defaults,
    /// making this a read-only scan.
    pub fn clear_configured(&self, namespace: &str) -> Result<SweepSummary, ResolveError> {
        let limits = self.resolver.config().limits_for(namespace);
        self.clear(namespace, &limits)
    }

    /// Sweep every configured namespace with its configured limits.
    ///
    /// Namespaces whose limits are disabled are skipped. Returns one
    /// `(namespace, summary)` pair per swept namespace.
    pub fn sweep_all(&self) -> Vec<(String, SweepSummary)> {
        let mut results = Vec::new();

        for spec in self.resolver.config().namespaces() {
            if spec.limits.is_disabled() {
                debug!(namespace = %spec.name, "Skipping namespace with disabled limits");
                continue;
            }

            match self.clear(&spec.name, &spec.limits) {
                Ok(summary) => results.push((spec.name.clone(), summary)),
                // The namespace came from the config, so resolution can
                // only fail if the document changed underneath us.
                Err(e) => debug!(namespace = %spec.name, error = %e, "Sweep skipped"),
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NamespaceSpec, RootEntry, RootKind};
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn create_test_file(path: &Path, size: usize, age_secs: u64) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, vec![0u8; size]).unwrap();

        let mtime = SystemTime::now() - Duration::from_secs(age_secs);
        filetime::set_file_mtime(path, filetime::FileTime::from_system_time(mtime)).unwrap();
    }

    /// Sweeper whose cache base points into the temp dir; namespaces:
    /// "thumbs" (one cache root, 24h/200KB) and "barren" (no roots).
    fn test_sweeper(temp_dir: &TempDir) -> CacheSweeper {
        let bases = BasePaths {
            device: PathBuf::from("/"),
            files: temp_dir.path().join("files"),
            cache: temp_dir.path().join("cache"),
            external: temp_dir.path().join("external"),
        };
        let config = RootsConfig::new(vec![
            NamespaceSpec::new(
                "thumbs",
                vec![RootEntry::new(RootKind::CacheRoot, "thumbs")],
                SweepLimits::new(24, 200),
            ),
            NamespaceSpec::new("barren", vec![], SweepLimits::new(1, 1)),
            NamespaceSpec::new(
                "unlimited",
                vec![RootEntry::new(RootKind::CacheRoot, "unlimited")],
                SweepLimits::default(),
            ),
        ]);
        CacheSweeper::new(config, bases)
    }

    #[test]
    fn clear_applies_both_rules() {
        let temp_dir = TempDir::new().unwrap();
        let sweeper = test_sweeper(&temp_dir);
        let root = temp_dir.path().join("cache/thumbs");

        create_test_file(&root.join("expired.bin"), 10 * 1024, 48 * 3600);
        create_test_file(&root.join("big.bin"), 220 * 1024, 3600);
        create_test_file(&root.join("small.bin"), 30 * 1024, 3600);

        let summary = sweeper
            .clear("thumbs", &SweepLimits::new(24, 200))
            .unwrap();

        assert_eq!(summary.age_evicted, 1);
        assert_eq!(summary.size_evicted, 1);
        assert!(!root.join("expired.bin").exists());
        assert!(!root.join("big.bin").exists());
        assert!(root.join("small.bin").exists());
        assert_eq!(summary.remaining_bytes, 30 * 1024);
    }

    #[test]
    fn clear_unknown_namespace_fails() {
        let temp_dir = TempDir::new().unwrap();
        let sweeper = test_sweeper(&temp_dir);

        let err = sweeper
            .clear("missing", &SweepLimits::default())
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnknownNamespace(_)));
    }

    #[test]
    fn clear_with_zero_directories_yields_empty_summary() {
        let temp_dir = TempDir::new().unwrap();
        let sweeper = test_sweeper(&temp_dir);

        let summary = sweeper.clear("barren", &SweepLimits::new(1, 1)).unwrap();

        assert_eq!(summary.files_scanned, 0);
        assert_eq!(summary.files_deleted(), 0);
        assert_eq!(summary.remaining_bytes, 0);
    }

    #[test]
    fn clear_with_unresolved_root_directory_is_fine() {
        // The cache root was never created on disk.
        let temp_dir = TempDir::new().unwrap();
        let sweeper = test_sweeper(&temp_dir);

        let summary = sweeper
            .clear("thumbs", &SweepLimits::new(24, 200))
            .unwrap();
        assert_eq!(summary.files_scanned, 0);
    }

    #[test]
    fn clear_configured_reads_limits_from_document() {
        let temp_dir = TempDir::new().unwrap();
        let sweeper = test_sweeper(&temp_dir);
        let root = temp_dir.path().join("cache/thumbs");

        create_test_file(&root.join("expired.bin"), 1024, 48 * 3600);

        let summary = sweeper.clear_configured("thumbs").unwrap();
        assert_eq!(summary.age_evicted, 1);
    }

    #[test]
    fn clear_twice_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let sweeper = test_sweeper(&temp_dir);
        let root = temp_dir.path().join("cache/thumbs");

        create_test_file(&root.join("expired.bin"), 10 * 1024, 48 * 3600);
        create_test_file(&root.join("big.bin"), 250 * 1024, 3600);

        let limits = SweepLimits::new(24, 200);
        let first = sweeper.clear("thumbs", &limits).unwrap();
        assert!(first.files_deleted() > 0);

        let second = sweeper.clear("thumbs", &limits).unwrap();
        assert_eq!(second.files_deleted(), 0);
        assert_eq!(second.remaining_bytes, first.remaining_bytes);
    }

    #[test]
    fn sweep_all_skips_disabled_namespaces() {
        let temp_dir = TempDir::new().unwrap();
        let sweeper = test_sweeper(&temp_dir);

        create_test_file(
            &temp_dir.path().join("cache/unlimited/ancient.bin"),
            1024,
            365 * 24 * 3600,
        );
        create_test_file(
            &temp_dir.path().join("cache/thumbs/expired.bin"),
            1024,
            48 * 3600,
        );

        let results = sweeper.sweep_all();
        let names: Vec<_> = results.iter().map(|(name, _)| name.as_str()).collect();

        assert!(names.contains(&"thumbs"));
        assert!(names.contains(&"barren"));
        assert!(!names.contains(&"unlimited"));
        // The disabled namespace's files were left alone.
        assert!(temp_dir
            .path()
            .join("cache/unlimited/ancient.bin")
            .exists());
    }

    #[test]
    fn concurrent_clears_of_one_namespace_are_serialized() {
        let temp_dir = TempDir::new().unwrap();
        let sweeper = Arc::new(test_sweeper(&temp_dir));
        let root = temp_dir.path().join("cache/thumbs");

        for i in 0..20 {
            create_test_file(&root.join(format!("expired{}.bin", i)), 1024, 48 * 3600);
        }

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sweeper = Arc::clone(&sweeper);
                std::thread::spawn(move || {
                    sweeper.clear("thumbs", &SweepLimits::new(24, 0)).unwrap()
                })
            })
            .collect();

        let total_age_evicted: u64 = handles
            .into_iter()
            .map(|h| h.join().unwrap().age_evicted)
            .sum();

        // Every file is deleted exactly once across all racing sweeps.
        assert_eq!(total_age_evicted, 20);
        assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
    }
}
