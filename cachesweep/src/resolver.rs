//! Namespace-to-directory resolution with per-instance memoization.
//!
//! A [`DirectoryResolver`] owns the parsed roots document and the four
//! base paths, and maps a namespace name to the ordered list of absolute
//! directories it owns. Results are computed lazily on first resolution
//! and cached for the lifetime of the resolver; repeated resolution is
//! idempotent. Concurrent first-time resolution of the same namespace is
//! a benign race - both sides compute the same list and one wins the
//! memo slot.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

use crate::config::{BasePaths, RootsConfig};

/// Directory resolution errors.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The roots document has no section for this namespace.
    #[error("Unknown cache namespace: {0}")]
    UnknownNamespace(String),

    /// The namespace resolves to zero directories but a single directory
    /// was requested.
    #[error("Namespace '{0}' has no directories configured")]
    NoDirectory(String),
}

/// Resolves namespaces to their owned directory lists.
pub struct DirectoryResolver {
    config: RootsConfig,
    bases: BasePaths,
    /// Memoized namespace → directory list, never evicted.
    resolved: DashMap<String, Arc<Vec<PathBuf>>>,
}

impl DirectoryResolver {
    /// Create a resolver over a parsed roots document and base paths.
    pub fn new(config: RootsConfig, bases: BasePaths) -> Self {
        Self {
            config,
            bases,
            resolved: DashMap::new(),
        }
    }

    /// The roots document this resolver was built from.
    pub fn config(&self) -> &RootsConfig {
        &self.config
    }

    /// Resolve a namespace to its ordered directory list.
    ///
    /// Entries resolve to `base(kind)/relative_path` in document order.
    /// An empty list is legal. The result is memoized per namespace.
    pub fn resolve(&self, namespace: &str) -> Result<Arc<Vec<PathBuf>>, ResolveError> {
        if let Some(dirs) = self.resolved.get(namespace) {
            return Ok(Arc::clone(&dirs));
        }

        let spec = self
            .config
            .namespace(namespace)
            .ok_or_else(|| ResolveError::UnknownNamespace(namespace.to_string()))?;

        let dirs: Arc<Vec<PathBuf>> = Arc::new(
            spec.roots
                .iter()
                .map(|entry| self.bases.base(entry.kind).join(&entry.relative_path))
                .collect(),
        );

        let dirs = self
            .resolved
            .entry(namespace.to_string())
            .or_insert(dirs)
            .clone();
        Ok(dirs)
    }

    /// The first directory of a namespace.
    ///
    /// Fails with [`ResolveError::NoDirectory`] when the namespace
    /// resolves to an empty list.
    pub fn primary_directory(&self, namespace: &str) -> Result<PathBuf, ResolveError> {
        let dirs = self.resolve(namespace)?;
        dirs.first()
            .cloned()
            .ok_or_else(|| ResolveError::NoDirectory(namespace.to_string()))
    }
}
