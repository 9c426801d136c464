//! `clear` and `sweep` commands.

use std::path::Path;

use cachesweep::config::format_size;
use cachesweep::engine::{SweepLimits, SweepSummary};

use crate::error::CliError;

/// Clear one namespace, with optional limit overrides.
///
/// Omitted limits fall back to the values configured in the roots
/// document (0/disabled when the document carries none).
pub fn run(
    config_path: Option<&Path>,
    namespace: &str,
    max_age_hours: Option<u64>,
    max_size_kb: Option<u64>,
) -> Result<(), CliError> {
    let sweeper = super::load_sweeper(config_path)?;

    let configured = sweeper.resolver().config().limits_for(namespace);
    let limits = SweepLimits::new(
        max_age_hours.unwrap_or(configured.max_age_hours),
        max_size_kb.unwrap_or(configured.max_size_kb),
    );

    if limits.is_disabled() {
        println!(
            "Namespace '{}' has no limits configured; nothing to do.",
            namespace
        );
        println!("Pass --max-age-hours and/or --max-size-kb, or set them in the roots document.");
        return Ok(());
    }

    let summary = sweeper.clear(namespace, &limits)?;
    print_summary(namespace, &summary, &limits);
    Ok(())
}

/// Sweep every configured namespace once.
pub fn run_all(config_path: Option<&Path>) -> Result<(), CliError> {
    let sweeper = super::load_sweeper(config_path)?;

    let results = sweeper.sweep_all();
    if results.is_empty() {
        println!("No namespaces with enabled limits; nothing to do.");
        return Ok(());
    }

    for (namespace, summary) in &results {
        let limits = sweeper.resolver().config().limits_for(namespace);
        print_summary(namespace, summary, &limits);
    }
    Ok(())
}

fn print_summary(namespace: &str, summary: &SweepSummary, limits: &SweepLimits) {
    println!(
        "{}: scanned {} files, deleted {} ({} by age, {} by size), freed {}, remaining {}",
        namespace,
        summary.files_scanned,
        summary.files_deleted(),
        summary.age_evicted,
        summary.size_evicted,
        format_size(summary.bytes_freed),
        format_size(summary.remaining_bytes),
    );

    if summary.delete_failures > 0 {
        println!("  {} files could not be deleted", summary.delete_failures);
    }

    let residual = summary.residual_bytes(limits);
    if residual > 0 {
        println!("  still {} over the size budget", format_size(residual));
    }
}
