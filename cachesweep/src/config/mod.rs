//! Declarative roots document and base-path configuration.
//!
//! The document is an INI file with one section per cache namespace.
//! Within a section, each root-defining key names a base-path kind and
//! its value is the relative sub-path; `max_age_hours` and `max_size_kb`
//! carry the namespace's sweep limits:
//!
//! ```ini
//! [thumbnails]
//! cache-root = images/thumbs
//! files-root = attachments/img
//! max_age_hours = 24
//! max_size_kb = 51200
//! ```

mod file;
mod parser;
mod settings;
mod size;

pub use file::{config_directory, default_config_path, ConfigError};
pub use settings::{BasePaths, NamespaceSpec, RootEntry, RootKind, RootsConfig};
pub use size::format_size;
