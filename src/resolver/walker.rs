//! Fixpoint walk over description file references
//!
//! ```text
//! sim.launch ──> bot.urdf.xacro ──> wheel.xacro ──> wheel.dae
//!                      │                 └────────> wheel.png
//!                      └──────────> base.stl
//! ```
//!
//! Each round parses the description files discovered by the previous round.
//! The walk ends once a round discovers no chainable file that has not been
//! parsed yet.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::BundleConfig;
use crate::error::Result;
use crate::registry::PackageRegistry;
use crate::workspace::path::find_files;

use super::launch::description_seeds;
use super::reference::resources_from_file;

/// Everything the workspace description files depend on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    /// Packages referenced by description files
    pub packages: BTreeSet<String>,
    /// Description files that were parsed
    pub descriptions: BTreeSet<PathBuf>,
    /// Every resolved resource file
    pub resources: BTreeSet<PathBuf>,
    /// Number of parse rounds until fixpoint
    pub rounds: usize,
}

impl DependencySet {
    pub fn package_list(&self) -> Vec<&str> {
        self.packages.iter().map(String::as_str).collect()
    }
}

/// Follows references from launch files down to meshes and textures
pub struct DependencyWalker<'a> {
    registry: &'a dyn PackageRegistry,
    config: &'a BundleConfig,
}

impl<'a> DependencyWalker<'a> {
    pub fn new(registry: &'a dyn PackageRegistry, config: &'a BundleConfig) -> Self {
        Self { registry, config }
    }

    /// Seed from the launch files under `src` and walk to fixpoint
    pub fn walk_workspace(&self, src: &Path) -> Result<DependencySet> {
        let launch_files = find_files(src, &self.config.seed_pattern)?;
        let seeds = description_seeds(&launch_files, self.registry, self.config)?;
        self.walk(seeds)
    }

    /// Walk to fixpoint starting from `seeds`
    pub fn walk(&self, seeds: impl IntoIterator<Item = PathBuf>) -> Result<DependencySet> {
        let mut result = DependencySet::default();
        let mut frontier: BTreeSet<PathBuf> = seeds.into_iter().collect();

        while !frontier.is_empty() {
            result.rounds += 1;
            let mut discovered = Vec::new();

            for file in frontier {
                if !result.descriptions.insert(file.clone()) {
                    continue;
                }
                let found = resources_from_file(&file, self.registry, self.config)?;
                result.packages.extend(found.packages);
                discovered.extend(found.resources);
            }

            frontier = discovered
                .iter()
                .filter(|path| self.config.is_chainable(path))
                .filter(|path| !result.descriptions.contains(*path))
                .cloned()
                .collect();
            result.resources.extend(discovered);
        }

        Ok(result)
    }
}
