//! INI parsing logic for converting `Ini` → `RootsConfig`.
//!
//! This is the single place where document keys are mapped to namespace
//! specs. One section per namespace; within a section every root-defining
//! key (`device-root`, `files-root`, `cache-root`, `external-root`) adds
//! one entry, in document order, duplicates allowed. The keys
//! `max_age_hours` and `max_size_kb` carry the namespace's sweep limits.
//! Unrecognized keys are ignored, not errors.

use ini::Ini;

use super::file::ConfigError;
use super::settings::{NamespaceSpec, RootEntry, RootKind, RootsConfig};
use crate::engine::SweepLimits;

/// Parse an `Ini` object into a `RootsConfig`.
pub(super) fn parse_ini(ini: &Ini) -> Result<RootsConfig, ConfigError> {
    let mut namespaces = Vec::new();

    for (section_name, props) in ini.iter() {
        // Properties outside any section do not belong to a namespace.
        let Some(name) = section_name else {
            continue;
        };

        let mut roots = Vec::new();
        let mut limits = SweepLimits::default();

        for (key, value) in props.iter() {
            if let Some(kind) = RootKind::from_key(key) {
                roots.push(RootEntry::new(kind, value.trim()));
                continue;
            }

            match key {
                "max_age_hours" => {
                    limits.max_age_hours = parse_limit(name, key, value)?;
                }
                "max_size_kb" => {
                    limits.max_size_kb = parse_limit(name, key, value)?;
                }
                _ => {
                    tracing::debug!(
                        section = name,
                        key,
                        "Ignoring unrecognized key in roots document"
                    );
                }
            }
        }

        namespaces.push(NamespaceSpec::new(name, roots, limits));
    }

    Ok(RootsConfig::new(namespaces))
}

fn parse_limit(section: &str, key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be a non-negative integer".to_string(),
        })
}
