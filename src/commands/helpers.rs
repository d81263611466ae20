//! Command helper utilities

use std::path::{Path, PathBuf};

use crate::config::BundleConfig;
use crate::error::{Result, SimBundleError};
use crate::workspace::SimWorkspace;

/// Resolve the current directory
pub fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| SimBundleError::IoError {
        message: format!("Failed to get current directory: {}", e),
    })
}

/// Load the configuration and apply command line overrides
pub fn load_config(
    anchor: Option<String>,
    config: Option<&Path>,
    cwd: &Path,
) -> Result<BundleConfig> {
    let mut bundle_config = BundleConfig::load(config, cwd)?;
    if let Some(anchor) = anchor {
        bundle_config.anchor_package = anchor;
    }
    Ok(bundle_config)
}

/// Open the workspace described by the environment and the configuration
pub fn open_workspace(anchor: Option<String>, config: Option<&Path>) -> Result<SimWorkspace> {
    let bundle_config = load_config(anchor, config, &current_dir()?)?;
    Ok(SimWorkspace::from_env(bundle_config))
}
