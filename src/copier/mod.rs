//! Directory copy and cleanup for the staging directory
//!
//! Copies are incremental: a file is only written when the destination is
//! missing or more than a second older than the source. Copied files keep the
//! source modification time, so repeating a copy with unchanged sources writes
//! nothing.

use std::fs;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use std::time::Duration;

use walkdir::WalkDir;

use crate::error::{Result, SimBundleError};

pub mod pipeline;

/// Source files must be newer than this to replace an existing copy
const MTIME_TOLERANCE: Duration = Duration::from_secs(1);

/// Outcome of one or more copies
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyStats {
    pub copied: usize,
    pub skipped: usize,
}

impl AddAssign for CopyStats {
    fn add_assign(&mut self, other: Self) {
        self.copied += other.copied;
        self.skipped += other.skipped;
    }
}

/// Copy the contents of `src` into `dst`, creating `dst` if needed
pub fn copy_tree(src: &Path, dst: &Path) -> Result<CopyStats> {
    if !src.is_dir() {
        return Err(SimBundleError::DirectoryNotFound {
            path: src.display().to_string(),
        });
    }
    fs::create_dir_all(dst)?;

    let mut stats = CopyStats::default();
    for entry in WalkDir::new(src).min_depth(1).follow_links(true) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| SimBundleError::IoError {
                message: format!("{}: {e}", entry.path().display()),
            })?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if needs_copy(entry.path(), &target)? {
            copy_file(entry.path(), &target)?;
            stats.copied += 1;
        } else {
            stats.skipped += 1;
        }
    }

    Ok(stats)
}

fn needs_copy(src: &Path, dst: &Path) -> Result<bool> {
    let Ok(dst_meta) = fs::metadata(dst) else {
        return Ok(true);
    };
    let src_mtime = fs::metadata(src)?.modified()?;
    let dst_mtime = dst_meta.modified()?;
    Ok(src_mtime
        .duration_since(dst_mtime)
        .is_ok_and(|delta| delta > MTIME_TOLERANCE))
}

fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    let mtime = fs::metadata(src)?.modified()?;
    fs::copy(src, dst)?;
    let file = fs::File::options()
        .write(true)
        .open(dst)
        .or_else(|_| fs::File::open(dst))?;
    file.set_modified(mtime)?;
    Ok(())
}

fn has_allowed_extension(path: &Path, allowed: &[String]) -> bool {
    let Some(ext) = path.extension() else {
        return false;
    };
    let suffix = format!(".{}", ext.to_string_lossy().to_lowercase());
    allowed.iter().any(|a| a.to_lowercase() == suffix)
}

/// Delete every file under `root` whose extension is not in `allowed`
///
/// Extensions are compared case-insensitively with their leading dot
/// (`.dae`). Returns the number of deleted files.
pub fn retain_extensions(root: &Path, allowed: &[String]) -> Result<usize> {
    if !root.is_dir() {
        return Ok(0);
    }

    let mut doomed = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_dir() && !has_allowed_extension(entry.path(), allowed) {
            doomed.push(entry.into_path());
        }
    }

    for path in &doomed {
        fs::remove_file(path)?;
    }
    Ok(doomed.len())
}

fn is_empty_dir(dir: &Path) -> Result<bool> {
    Ok(fs::read_dir(dir)?.next().is_none())
}

/// Remove empty directories under `root` bottom-up
///
/// `root` itself is removed too when it ends up empty and `remove_root` is
/// set. Returns the number of removed directories.
pub fn remove_empty_dirs(root: &Path, remove_root: bool) -> Result<usize> {
    if !root.is_dir() {
        return Ok(0);
    }

    let mut dirs: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root).contents_first(true) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }

    let mut removed = 0;
    for dir in dirs {
        if dir == root && !remove_root {
            continue;
        }
        if is_empty_dir(&dir)? {
            fs::remove_dir(&dir)?;
            removed += 1;
        }
    }
    Ok(removed)
}
