//! cachesweep - bounded-size, age-limited disk cache janitor.
//!
//! Maintains one or more cache namespaces, each owning a set of directory
//! roots declared in a small INI document. A sweep scans every file under
//! a namespace's roots and removes files that are too old, then evicts
//! the highest-scoring survivors until the aggregate size fits the
//! configured budget.
//!
//! # High-Level API
//!
//! ```ignore
//! use cachesweep::config::{BasePaths, RootsConfig};
//! use cachesweep::engine::SweepLimits;
//! use cachesweep::sweep::CacheSweeper;
//!
//! let config = RootsConfig::load()?;
//! let sweeper = CacheSweeper::new(config, BasePaths::discover("myapp"));
//!
//! let summary = sweeper.clear("thumbnails", &SweepLimits::new(24, 51200))?;
//! println!("freed {} bytes", summary.bytes_freed);
//! ```

pub mod config;
pub mod daemon;
pub mod engine;
pub mod logging;
pub mod resolver;
pub mod sweep;
pub mod walker;

/// Version of the cachesweep library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
