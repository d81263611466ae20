//! Simulation workspace context
//!
//! A catkin workspace as seen by simbundle:
//!
//! ```text
//! catkin_ws/
//! └── src/                      # located from the anchor package
//!     ├── virtual_maize_field/  # anchor: worlds, models, Media, launch
//!     └── my_robot/             # packages referenced by launch files
//! ```
//!
//! The package registry and the Gazebo resource path are captured once so
//! validation checks and the copy pipeline see the same environment.

use std::path::PathBuf;

use crate::config::BundleConfig;
use crate::error::Result;
use crate::registry::{PackageRegistry, RosPackageIndex};

pub mod detection;
pub mod path;

/// Environment variable listing the Gazebo resource roots
pub const GAZEBO_RESOURCE_VAR: &str = "GAZEBO_RESOURCE_PATH";

/// Everything the checks and the copier need to know about the workspace
pub struct SimWorkspace {
    pub config: BundleConfig,
    pub registry: Box<dyn PackageRegistry>,
    /// Raw value of `GAZEBO_RESOURCE_PATH`
    pub gazebo_resource_path: Option<String>,
}

impl std::fmt::Debug for SimWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimWorkspace")
            .field("config", &self.config)
            .field("gazebo_resource_path", &self.gazebo_resource_path)
            .finish_non_exhaustive()
    }
}

impl SimWorkspace {
    pub fn new(
        config: BundleConfig,
        registry: Box<dyn PackageRegistry>,
        gazebo_resource_path: Option<String>,
    ) -> Self {
        Self {
            config,
            registry,
            gazebo_resource_path,
        }
    }

    /// Capture `ROS_PACKAGE_PATH` and `GAZEBO_RESOURCE_PATH` from the process
    pub fn from_env(config: BundleConfig) -> Self {
        Self::new(
            config,
            Box::new(RosPackageIndex::from_env()),
            std::env::var(GAZEBO_RESOURCE_VAR).ok(),
        )
    }

    /// Root of the anchor package
    pub fn anchor_path(&self) -> Result<PathBuf> {
        self.registry.get_path(&self.config.anchor_package)
    }

    /// The workspace `src` folder enclosing the anchor package
    pub fn src_folder(&self) -> Result<PathBuf> {
        detection::find_src_folder(self.registry.as_ref(), &self.config.anchor_package)
    }

    /// Gazebo material scripts folder
    pub fn material_resources(&self) -> Result<PathBuf> {
        detection::find_material_resources(
            self.gazebo_resource_path.as_deref(),
            &self.config.viewer.material_scripts,
        )
    }
}
