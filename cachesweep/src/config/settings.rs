//! Settings structs for the roots document.
//!
//! A `RootsConfig` holds one [`NamespaceSpec`] per configured cache
//! namespace. Each namespace declares an ordered list of [`RootEntry`]
//! values (a base-path kind plus a relative sub-path) and optional sweep
//! limits. Parsing lives in [`super::parser`], loading in [`super::file`].

use std::path::{Path, PathBuf};

use crate::engine::SweepLimits;

/// The four base-path kinds a root entry can anchor to.
///
/// Spelled `device-root`, `files-root`, `cache-root` and `external-root`
/// in the configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootKind {
    /// The filesystem root.
    DeviceRoot,
    /// The application's private data directory.
    FilesRoot,
    /// The application's private cache directory.
    CacheRoot,
    /// Shared external storage (the user's home area).
    ExternalRoot,
}

impl RootKind {
    /// Parse a document key into a root kind.
    ///
    /// Returns `None` for keys that are not root-defining; callers treat
    /// those as unrecognized and skip them.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "device-root" => Some(RootKind::DeviceRoot),
            "files-root" => Some(RootKind::FilesRoot),
            "cache-root" => Some(RootKind::CacheRoot),
            "external-root" => Some(RootKind::ExternalRoot),
            _ => None,
        }
    }

    /// The document spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            RootKind::DeviceRoot => "device-root",
            RootKind::FilesRoot => "files-root",
            RootKind::CacheRoot => "cache-root",
            RootKind::ExternalRoot => "external-root",
        }
    }
}

/// One root-defining entry: a base-path kind plus a relative sub-path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootEntry {
    /// Which base path this entry anchors to.
    pub kind: RootKind,
    /// Sub-path below the base, as written in the document.
    pub relative_path: String,
}

impl RootEntry {
    /// Create a new root entry.
    pub fn new(kind: RootKind, relative_path: impl Into<String>) -> Self {
        Self {
            kind,
            relative_path: relative_path.into(),
        }
    }
}

/// Everything the document declares for one cache namespace.
#[derive(Debug, Clone)]
pub struct NamespaceSpec {
    /// Namespace identifier (the section name in the document).
    pub name: String,
    /// Root entries in document order.
    pub roots: Vec<RootEntry>,
    /// Sweep limits; zero fields mean disabled.
    pub limits: SweepLimits,
}

impl NamespaceSpec {
    /// Create a namespace spec with the given roots and limits.
    pub fn new(name: impl Into<String>, roots: Vec<RootEntry>, limits: SweepLimits) -> Self {
        Self {
            name: name.into(),
            roots,
            limits,
        }
    }
}

/// The parsed roots document: an ordered set of namespace specs.
#[derive(Debug, Clone, Default)]
pub struct RootsConfig {
    namespaces: Vec<NamespaceSpec>,
}

impl RootsConfig {
    /// Build a config from already-parsed namespace specs.
    ///
    /// Used by the document parser and by tests that construct
    /// configurations in memory.
    pub fn new(namespaces: Vec<NamespaceSpec>) -> Self {
        Self { namespaces }
    }

    /// All namespaces in document order.
    pub fn namespaces(&self) -> &[NamespaceSpec] {
        &self.namespaces
    }

    /// Look up a namespace by name.
    pub fn namespace(&self, name: &str) -> Option<&NamespaceSpec> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }

    /// Sweep limits for a namespace.
    ///
    /// Namespaces without configured limits (or unknown namespaces) get
    /// the disabled defaults; resolution errors for unknown namespaces
    /// surface later, when directories are resolved.
    pub fn limits_for(&self, name: &str) -> SweepLimits {
        self.namespace(name)
            .map(|ns| ns.limits)
            .unwrap_or_default()
    }
}

/// The four platform-supplied base directories root entries resolve
/// against.
#[derive(Debug, Clone)]
pub struct BasePaths {
    /// Base for `device-root` entries.
    pub device: PathBuf,
    /// Base for `files-root` entries.
    pub files: PathBuf,
    /// Base for `cache-root` entries.
    pub cache: PathBuf,
    /// Base for `external-root` entries.
    pub external: PathBuf,
}

impl BasePaths {
    /// Discover base paths for an application name from the platform.
    ///
    /// `device` is the filesystem root, `files` the per-user data
    /// directory, `cache` the per-user cache directory (both suffixed with
    /// the application name), and `external` the user's home directory.
    pub fn discover(app_name: &str) -> Self {
        Self {
            device: PathBuf::from("/"),
            files: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(app_name),
            cache: dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(app_name),
            external: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// The base path for a root kind.
    pub fn base(&self, kind: RootKind) -> &Path {
        match kind {
            RootKind::DeviceRoot => &self.device,
            RootKind::FilesRoot => &self.files,
            RootKind::CacheRoot => &self.cache,
            RootKind::ExternalRoot => &self.external,
        }
    }
}
