//! Package registry lookup
//!
//! Maps ROS package names to their source or install directories, the way
//! `rospack find` does: every root on `ROS_PACKAGE_PATH` is crawled for
//! directories holding a `package.xml` manifest.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SimBundleError};
use crate::xml;

/// Environment variable listing the package search roots
pub const PACKAGE_PATH_VAR: &str = "ROS_PACKAGE_PATH";

const MANIFEST_FILE: &str = "package.xml";
const IGNORE_MARKER: &str = "CATKIN_IGNORE";

/// Resolves package names to filesystem locations
pub trait PackageRegistry {
    /// Root directory of package `name`
    fn get_path(&self, name: &str) -> Result<PathBuf>;
}

/// Package index built by crawling search roots
#[derive(Debug, Clone, Default)]
pub struct RosPackageIndex {
    packages: BTreeMap<String, PathBuf>,
}

/// Split a colon separated search path, dropping empty entries
pub fn split_search_path(value: &str) -> Vec<PathBuf> {
    std::env::split_paths(value)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}

impl RosPackageIndex {
    /// Crawl the roots listed in `ROS_PACKAGE_PATH`
    ///
    /// An unset variable yields an empty index, so every lookup reports the
    /// package as missing.
    pub fn from_env() -> Self {
        match std::env::var(PACKAGE_PATH_VAR) {
            Ok(value) => Self::crawl(&split_search_path(&value)),
            Err(_) => Self::default(),
        }
    }

    /// Crawl `roots` in order; the first package found under a name wins
    pub fn crawl(roots: &[PathBuf]) -> Self {
        let mut packages = BTreeMap::new();
        for root in roots {
            crawl_root(root, &mut packages);
        }
        Self { packages }
    }

    /// Number of known packages
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl PackageRegistry for RosPackageIndex {
    fn get_path(&self, name: &str) -> Result<PathBuf> {
        self.packages
            .get(name)
            .cloned()
            .ok_or_else(|| SimBundleError::PackageNotFound {
                name: name.to_string(),
            })
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn crawl_root(root: &Path, packages: &mut BTreeMap<String, PathBuf>) {
    let mut walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let Ok(entry) = entry else { continue };
        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        if (entry.depth() > 0 && is_hidden(dir)) || dir.join(IGNORE_MARKER).exists() {
            walker.skip_current_dir();
            continue;
        }

        let manifest = dir.join(MANIFEST_FILE);
        if manifest.is_file() {
            let name = manifest_name(&manifest).unwrap_or_else(|| {
                dir.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });
            packages.entry(name).or_insert_with(|| dir.to_path_buf());
            walker.skip_current_dir();
        }
    }
}

fn manifest_name(manifest: &Path) -> Option<String> {
    let text = xml::read_document(manifest).ok()?;
    xml::root_child_text(&text, b"name", manifest).ok()?
}

#[cfg(test)]
impl PackageRegistry for std::collections::HashMap<String, PathBuf> {
    fn get_path(&self, name: &str) -> Result<PathBuf> {
        self.get(name)
            .cloned()
            .ok_or_else(|| SimBundleError::PackageNotFound {
                name: name.to_string(),
            })
    }
}
