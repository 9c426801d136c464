//! Recursive file enumeration under cache roots.
//!
//! [`walk_files`] returns a lazy iterator over every regular file beneath
//! a set of root directories. Directories are traversed, not yielded, and
//! sibling order is unspecified. Roots that do not exist or cannot be
//! listed are silently skipped - a cache root may not have been created
//! yet. The walk is restartable: each call produces a fresh iterator.

use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use tracing::debug;

/// A file observed during a scan, read live from the filesystem.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Size in bytes at scan time.
    pub size_bytes: u64,
    /// Last modification time; `UNIX_EPOCH` when unavailable.
    pub modified: SystemTime,
}

/// Lazy depth-first iterator over the files beneath a set of roots.
pub struct FileWalker {
    pending: Vec<PathBuf>,
    current: Option<fs::ReadDir>,
}

/// Walk every regular file under every directory in `roots`.
pub fn walk_files(roots: &[PathBuf]) -> FileWalker {
    // Reversed so the first configured root is scanned first.
    FileWalker {
        pending: roots.iter().rev().cloned().collect(),
        current: None,
    }
}

impl Iterator for FileWalker {
    type Item = FileRecord;

    fn next(&mut self) -> Option<FileRecord> {
        loop {
            let Some(read_dir) = self.current.as_mut() else {
                let dir = self.pending.pop()?;
                match fs::read_dir(&dir) {
                    Ok(read_dir) => self.current = Some(read_dir),
                    Err(e) => {
                        debug!(
                            dir = %dir.display(),
                            error = %e,
                            "Skipping unreadable directory during scan"
                        );
                    }
                }
                continue;
            };

            match read_dir.next() {
                Some(Ok(entry)) => {
                    let path = entry.path();
                    if path.is_dir() {
                        self.pending.push(path);
                    } else {
                        match entry.metadata() {
                            Ok(metadata) => {
                                let modified =
                                    metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
                                return Some(FileRecord {
                                    path,
                                    size_bytes: metadata.len(),
                                    modified,
                                });
                            }
                            Err(e) => {
                                debug!(
                                    path = %path.display(),
                                    error = %e,
                                    "Skipping unreadable file during scan"
                                );
                            }
                        }
                    }
                }
                Some(Err(e)) => {
                    debug!(error = %e, "Skipping unreadable directory entry during scan");
                }
                None => self.current = None,
            }
        }
    }
}
