//! Dependency resolution for simulation description files
//!
//! This module handles:
//! - Parsing `package://` and `$(find ...)` references in description files
//! - Seeding from description files used by launch files
//! - Walking references until no new description file shows up

pub mod launch;
pub mod reference;
pub mod walker;

pub use walker::{DependencySet, DependencyWalker};

use crate::error::Result;
use crate::workspace::SimWorkspace;

/// Resolve every package and file the workspace launch files depend on
pub fn resolve_workspace(workspace: &SimWorkspace) -> Result<DependencySet> {
    let src = workspace.src_folder()?;
    DependencyWalker::new(workspace.registry.as_ref(), &workspace.config).walk_workspace(&src)
}
