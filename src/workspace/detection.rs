//! Workspace detection utilities
//!
//! Locates the catkin `src` folder and the Gazebo material resources.

use std::path::{Path, PathBuf};

use crate::error::{Result, SimBundleError};
use crate::registry::{PackageRegistry, split_search_path};

use super::GAZEBO_RESOURCE_VAR;

/// Name of the workspace source folder
pub const SRC_DIR: &str = "src";

/// How many parents of the anchor package are inspected
const MAX_DEPTH: usize = 10;

/// Find the `src` folder enclosing `anchor_package`
///
/// Walks up from the package root, which may itself be the `src` folder.
pub fn find_src_folder(registry: &dyn PackageRegistry, anchor_package: &str) -> Result<PathBuf> {
    let start = registry.get_path(anchor_package)?;
    enclosing_src(&start).ok_or_else(|| SimBundleError::WorkspaceNotFound {
        start: start.display().to_string(),
    })
}

fn enclosing_src(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(MAX_DEPTH)
        .find(|dir| dir.file_name().is_some_and(|n| n == SRC_DIR))
        .map(Path::to_path_buf)
}

/// Find `subdir` under the first Gazebo resource root that has it
pub fn find_material_resources(resource_path: Option<&str>, subdir: &Path) -> Result<PathBuf> {
    let value = resource_path.ok_or_else(|| SimBundleError::EnvVarMissing {
        name: GAZEBO_RESOURCE_VAR.to_string(),
    })?;

    split_search_path(value)
        .into_iter()
        .filter_map(|root| dunce::canonicalize(root.join(subdir)).ok())
        .find(|candidate| candidate.is_dir())
        .ok_or_else(|| SimBundleError::ResourceFolderNotFound {
            subdir: subdir.display().to_string(),
            searched: value.to_string(),
        })
}
