//! Glob based file discovery inside the workspace

use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::error::{Result, SimBundleError};

/// Normalize a path to forward slashes for platform-independent matching
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Compile a glob pattern
pub fn compile_glob(pattern: &str) -> Result<Glob<'_>> {
    Glob::new(pattern).map_err(|e| SimBundleError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// All files under `root` whose root-relative path matches `pattern`, sorted
pub fn find_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let glob = compile_glob(pattern)?;
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let normalized = to_forward_slashes(relative);
        if glob.matched(&CandidatePath::from(normalized.as_str())).is_some() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
