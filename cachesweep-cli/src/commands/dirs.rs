//! `dirs` command: show the resolved directories of a namespace.

use std::path::Path;

use crate::error::CliError;

/// Print the resolved directory list and primary directory.
pub fn run(config_path: Option<&Path>, namespace: &str) -> Result<(), CliError> {
    let sweeper = super::load_sweeper(config_path)?;
    let resolver = sweeper.resolver();

    let dirs = resolver.resolve(namespace)?;
    if dirs.is_empty() {
        println!("Namespace '{}' has no directories configured.", namespace);
        return Ok(());
    }

    println!("Directories for '{}':", namespace);
    for dir in dirs.iter() {
        println!("  {}", dir.display());
    }

    let primary = resolver.primary_directory(namespace)?;
    println!("Primary: {}", primary.display());
    Ok(())
}
