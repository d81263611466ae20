//! Staging pipeline
//!
//! Builds the staging directory from three asset sets:
//!
//! ```text
//! simulation_files/
//! ├── Media/ map/ worlds/ launch/   # runtime set, copied verbatim
//! ├── gzweb/                        # viewer set, filtered to viewer extensions
//! │   ├── materials/scripts/
//! │   └── <package>/meshes/
//! └── robot_packages/               # every required package, filtered
//! ```
//!
//! Dependencies are resolved before anything under the output directory is
//! touched, so a broken description file leaves the previous staging intact.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::resolver::resolve_workspace;
use crate::ui::CopyReporter;
use crate::workspace::SimWorkspace;

use super::{CopyStats, copy_tree, remove_empty_dirs, retain_extensions};

/// Destination of the Gazebo material scripts inside the viewer set
const MATERIAL_SCRIPTS_TARGET: &str = "materials/scripts";

/// Folder marking a package as carrying meshes for the viewer
const MESHES_DIR: &str = "meshes";

#[derive(Debug, Clone, Copy)]
pub struct StageOptions {
    /// Remove old staging directories first
    pub clean: bool,
}

impl Default for StageOptions {
    fn default() -> Self {
        Self { clean: true }
    }
}

/// What a staging run did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StageSummary {
    pub stats: CopyStats,
    /// Files and directories deleted by filtering and pruning
    pub removed: usize,
    /// Packages staged for the robot descriptions
    pub packages: Vec<String>,
}

/// Stage every asset set into `output`
pub fn stage_assets(
    workspace: &SimWorkspace,
    output: &Path,
    options: StageOptions,
    reporter: &mut dyn CopyReporter,
) -> Result<StageSummary> {
    let result = run_stages(workspace, output, options, reporter);
    match &result {
        Ok(_) => reporter.finish(),
        Err(_) => reporter.abandon(),
    }
    result
}

fn run_stages(
    workspace: &SimWorkspace,
    output: &Path,
    options: StageOptions,
    reporter: &mut dyn CopyReporter,
) -> Result<StageSummary> {
    let config = &workspace.config;
    let anchor = workspace.anchor_path()?;
    let deps = resolve_workspace(workspace)?;
    let package_dirs = deps
        .packages
        .iter()
        .map(|name| workspace.registry.get_path(name))
        .collect::<Result<Vec<PathBuf>>>()?;

    if options.clean {
        reporter.note("Removing old simulation files...");
        clean_output(output)?;
    }
    fs::create_dir_all(output)?;

    let mut summary = StageSummary {
        packages: deps.packages.iter().cloned().collect(),
        ..StageSummary::default()
    };
    let mut step = |src: &Path, dst: &Path| -> Result<()> {
        reporter.begin_step(src, dst);
        let stats = copy_tree(src, dst)?;
        reporter.end_step(&stats);
        summary.stats += stats;
        Ok(())
    };

    for folder in &config.runtime.folders {
        step(&anchor.join(folder), &output.join(folder))?;
    }

    let viewer = output.join(&config.viewer.directory);
    for folder in &config.viewer.folders {
        step(&anchor.join(folder), &viewer)?;
    }
    step(
        &workspace.material_resources()?,
        &viewer.join(MATERIAL_SCRIPTS_TARGET),
    )?;
    for dir in package_dirs.iter().filter(|d| d.join(MESHES_DIR).is_dir()) {
        step(dir, &viewer.join(dir_name(dir)))?;
    }

    let robot_packages = output.join(&config.robot_packages.directory);
    for dir in &package_dirs {
        step(dir, &robot_packages.join(dir_name(dir)))?;
    }

    reporter.note("Filtering staged files...");
    summary.removed += retain_extensions(&viewer, &config.viewer.extensions)?;
    summary.removed += remove_empty_dirs(&viewer, true)?;
    summary.removed += retain_extensions(&robot_packages, &config.robot_packages.extensions)?;
    summary.removed += remove_empty_dirs(&robot_packages, true)?;

    Ok(summary)
}

fn dir_name(dir: &Path) -> &std::ffi::OsStr {
    dir.file_name().unwrap_or(dir.as_os_str())
}

/// Remove every directory directly under `output`; plain files stay
fn clean_output(output: &Path) -> Result<()> {
    if !output.is_dir() {
        return Ok(());
    }
    for entry in fs::read_dir(output)? {
        let path = entry?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        }
    }
    Ok(())
}
