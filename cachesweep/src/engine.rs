//! Two-phase cache eviction engine.
//!
//! [`sweep_directories`] scans every file under a set of roots and applies
//! two rules in order:
//!
//! 1. **Age rule** - files older than the age limit are deleted outright
//!    as they are encountered.
//! 2. **Size rule** - the survivors are held as purge candidates; once the
//!    scan completes, candidates are deleted highest-score-first until the
//!    aggregate size fits the budget or candidates run out.
//!
//! The score combines a size ratio and an age ratio, weighted 5:1 toward
//! size, so a purge reclaims the most space per deletion rather than
//! strictly evicting oldest-first. Candidates live in a max-heap keyed by
//! that score.
//!
//! Deletion failures are never fatal: the file keeps counting toward the
//! remaining size and the sweep moves on. A sweep that exhausts its
//! candidates while still over budget reports the residual in its summary
//! instead of raising an error.

use std::collections::BinaryHeap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};

use tracing::{debug, warn};

use crate::walker::{walk_files, FileRecord};

/// Weight of the size-ratio term relative to the age-ratio term.
const SIZE_WEIGHT: f64 = 5.0;

/// Per-namespace sweep limits. Zero means the rule is disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepLimits {
    /// Maximum file age in hours before unconditional deletion.
    pub max_age_hours: u64,
    /// Maximum aggregate size in kilobytes before priority eviction.
    pub max_size_kb: u64,
}

impl SweepLimits {
    /// Create limits from hours and kilobytes.
    pub fn new(max_age_hours: u64, max_size_kb: u64) -> Self {
        Self {
            max_age_hours,
            max_size_kb,
        }
    }

    /// Age limit in milliseconds; 0 when disabled.
    pub fn max_age_ms(&self) -> u64 {
        self.max_age_hours * 3_600_000
    }

    /// Size budget in bytes; 0 when disabled.
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_kb * 1024
    }

    /// True when both rules are disabled and a sweep would delete nothing.
    pub fn is_disabled(&self) -> bool {
        self.max_age_hours == 0 && self.max_size_kb == 0
    }
}

/// Result of one sweep over a namespace's directories.
#[derive(Debug, Clone, Default)]
pub struct SweepSummary {
    /// Number of files visited by the scan.
    pub files_scanned: u64,
    /// Files deleted by the age rule.
    pub age_evicted: u64,
    /// Files deleted by the size rule.
    pub size_evicted: u64,
    /// Deletion attempts that failed (either rule).
    pub delete_failures: u64,
    /// Total bytes reclaimed by successful deletions.
    pub bytes_freed: u64,
    /// Aggregate size of the files still on disk after the sweep.
    pub remaining_bytes: u64,
    /// Wall-clock duration of the sweep in milliseconds.
    pub duration_ms: u64,
}

impl SweepSummary {
    /// Bytes by which the sweep still exceeds the size budget.
    ///
    /// Zero when the budget was met or size limiting is disabled. A
    /// non-zero residual means eviction exhausted all candidates (or
    /// deletions kept failing) while still over budget.
    pub fn residual_bytes(&self, limits: &SweepLimits) -> u64 {
        let budget = limits.max_size_bytes();
        if budget == 0 {
            return 0;
        }
        self.remaining_bytes.saturating_sub(budget)
    }

    /// Total files deleted by either rule.
    pub fn files_deleted(&self) -> u64 {
        self.age_evicted + self.size_evicted
    }
}

/// A purge candidate ordered by eviction score (higher pops first).
struct ScoredCandidate {
    score: f64,
    record: FileRecord,
}

impl PartialEq for ScoredCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.score.total_cmp(&other.score).is_eq()
    }
}

impl Eq for ScoredCandidate {}

impl PartialOrd for ScoredCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredCandidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.score.total_cmp(&other.score)
    }
}

/// Eviction priority for a candidate file.
///
/// `size_weight * (size / budget) + age / age_limit`, with the age term
/// defined as 0 when the age limit is disabled so ordering degenerates to
/// pure size ratio. `max_size_bytes` must be non-zero (candidates only
/// exist when size limiting is enabled).
fn eviction_score(size_bytes: u64, age_ms: u64, max_age_ms: u64, max_size_bytes: u64) -> f64 {
    let size_ratio = size_bytes as f64 / max_size_bytes as f64;
    let age_ratio = if max_age_ms > 0 {
        age_ms as f64 / max_age_ms as f64
    } else {
        0.0
    };
    SIZE_WEIGHT * size_ratio + age_ratio
}

/// File age in milliseconds relative to `now`, saturating at 0 for
/// files with modification times in the future.
fn file_age_ms(now: SystemTime, modified: SystemTime) -> u64 {
    now.duration_since(modified)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Sweep every file under `dirs` against `limits`.
///
/// Scans once, applying the age rule inline; survivors become purge
/// candidates when a size budget is set. After the scan, candidates are
/// deleted highest-score-first until the remaining size fits the budget.
pub fn sweep_directories(dirs: &[PathBuf], limits: &SweepLimits) -> SweepSummary {
    let start = Instant::now();
    let now = SystemTime::now();
    let max_age_ms = limits.max_age_ms();
    let max_size_bytes = limits.max_size_bytes();

    let mut summary = SweepSummary::default();
    let mut remaining: u64 = 0;
    let mut candidates: BinaryHeap<ScoredCandidate> = BinaryHeap::new();

    // Phase 1: classify each file as it streams out of the walker.
    for record in walk_files(dirs) {
        summary.files_scanned += 1;
        let age_ms = file_age_ms(now, record.modified);

        if max_age_ms > 0 && age_ms > max_age_ms {
            match fs::remove_file(&record.path) {
                Ok(()) => {
                    debug!(
                        path = %record.path.display(),
                        size_bytes = record.size_bytes,
                        reason = "age",
                        outcome = "success",
                        "Cache file deleted"
                    );
                    summary.age_evicted += 1;
                    summary.bytes_freed += record.size_bytes;
                }
                Err(e) => {
                    debug!(
                        path = %record.path.display(),
                        size_bytes = record.size_bytes,
                        reason = "age",
                        outcome = "failure",
                        error = %e,
                        "Failed to delete cache file"
                    );
                    summary.delete_failures += 1;
                    // The file still occupies space.
                    remaining += record.size_bytes;
                }
            }
            continue;
        }

        let size_bytes = record.size_bytes;
        if max_size_bytes > 0 {
            let score = eviction_score(size_bytes, age_ms, max_age_ms, max_size_bytes);
            candidates.push(ScoredCandidate { score, record });
        }
        remaining += size_bytes;
    }

    // Phase 2: purge highest-scoring candidates until under budget.
    if max_size_bytes > 0 {
        while remaining > max_size_bytes {
            let Some(candidate) = candidates.pop() else {
                break;
            };
            let record = candidate.record;

            match fs::remove_file(&record.path) {
                Ok(()) => {
                    debug!(
                        path = %record.path.display(),
                        size_bytes = record.size_bytes,
                        score = candidate.score,
                        reason = "size",
                        outcome = "success",
                        "Cache file deleted"
                    );
                    summary.size_evicted += 1;
                    summary.bytes_freed += record.size_bytes;
                    remaining -= record.size_bytes;
                }
                Err(e) => {
                    // No retry within this pass; the file keeps counting
                    // toward the remaining size.
                    debug!(
                        path = %record.path.display(),
                        size_bytes = record.size_bytes,
                        reason = "size",
                        outcome = "failure",
                        error = %e,
                        "Failed to delete cache file"
                    );
                    summary.delete_failures += 1;
                }
            }
        }

        if remaining > max_size_bytes {
            warn!(
                remaining_bytes = remaining,
                budget_bytes = max_size_bytes,
                shortfall_bytes = remaining - max_size_bytes,
                "Sweep could not reach size budget"
            );
        }
    }

    if summary.files_deleted() > 0 {
        for dir in dirs {
            cleanup_empty_dirs(dir);
        }
    }

    summary.remaining_bytes = remaining;
    summary.duration_ms = start.elapsed().as_millis() as u64;
    summary
}

/// Remove empty directories left behind after a sweep.
///
/// Walks depth-first and removes directories that became empty once their
/// files were evicted. The roots themselves are preserved.
fn cleanup_empty_dirs(dir: &Path) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            // Recurse first to clean up nested empty directories
            cleanup_empty_dirs(&path);
            // Try to remove if empty (will fail silently if not empty)
            let _ = fs::remove_dir(&path);
        }
    }
}
