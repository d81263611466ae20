//! Description files used by launch files
//!
//! Launch files load robot descriptions through xacro commands such as
//! `command="$(find xacro)/xacro '$(find my_robot)/urdf/bot.urdf.xacro'"`,
//! so they are scanned as text rather than parsed as XML.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::config::BundleConfig;
use crate::error::{Result, SimBundleError};
use crate::registry::PackageRegistry;

use super::reference::ResourceReference;

/// Regex matching `$(find <pkg>)/<path>.<chainable extension>`
pub fn description_pattern(config: &BundleConfig) -> Result<Regex> {
    let extensions = config
        .chainable_extensions
        .iter()
        .map(|ext| regex::escape(ext))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r#"\$\(find\s+([^\s)]+)\)(/[^\s'"<>]*\.(?:{extensions}))"#);
    Regex::new(&pattern).map_err(|e| SimBundleError::InvalidPattern {
        pattern,
        reason: e.to_string(),
    })
}

/// Description file references in a launch file's text, in order of appearance
pub fn launch_references(text: &str, pattern: &Regex) -> Vec<ResourceReference> {
    pattern
        .captures_iter(text)
        .map(|caps| ResourceReference::new(&caps[1], &caps[2]))
        .collect()
}

/// Resolve the description files used by `launch_files`
pub fn description_seeds(
    launch_files: &[PathBuf],
    registry: &dyn PackageRegistry,
    config: &BundleConfig,
) -> Result<Vec<PathBuf>> {
    let pattern = description_pattern(config)?;
    let mut seeds = Vec::new();

    for launch_file in launch_files {
        let text = std::fs::read_to_string(launch_file)?;
        for reference in launch_references(&text, &pattern) {
            seeds.push(resolve_seed(&reference, registry, launch_file)?);
        }
    }

    Ok(seeds)
}

fn resolve_seed(
    reference: &ResourceReference,
    registry: &dyn PackageRegistry,
    launch_file: &Path,
) -> Result<PathBuf> {
    let path = reference.resolve(registry)?;
    if !path.is_file() {
        return Err(SimBundleError::ReferencedFileNotFound {
            path: path.display().to_string(),
            reference: launch_file.display().to_string(),
        });
    }
    Ok(path)
}
