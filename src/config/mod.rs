//! Bundle configuration (simbundle.yaml)
//!
//! Every key is optional. Missing keys fall back to the layout expected by the
//! virtual maize field simulation image.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimBundleError};

/// Default configuration file name, looked up in the current directory
pub const CONFIG_FILE: &str = "simbundle.yaml";

/// Extensions needed by the web viewer
const VIEWER_EXTENSIONS: &[&str] = &[
    ".stl",
    ".dae",
    ".sdf",
    ".config",
    ".material",
    ".png",
    ".jpg",
    ".tiff",
    ".jpeg",
    ".gazebo",
];

/// Top-level bundle configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundleConfig {
    /// Package whose install location identifies the workspace
    pub anchor_package: String,

    /// World file, relative to the anchor package
    pub world_file: PathBuf,

    /// Glob selecting the launch files that seed dependency discovery
    pub seed_pattern: String,

    /// Description file extensions whose references are followed (without dot)
    pub chainable_extensions: Vec<String>,

    /// Reference extensions that are skipped instead of resolved (without dot)
    pub skipped_extensions: Vec<String>,

    /// Staging directory
    pub output_dir: PathBuf,

    pub runtime: RuntimeAssets,
    pub viewer: ViewerAssets,
    pub robot_packages: PackageAssets,
}

/// Folders of the anchor package copied verbatim for the simulator runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeAssets {
    pub folders: Vec<String>,
}

/// Asset set for the web viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerAssets {
    /// Directory under the staging directory
    pub directory: String,

    /// Folders of the anchor package merged into the viewer directory
    pub folders: Vec<String>,

    /// Material scripts folder, relative to a Gazebo resource path entry
    pub material_scripts: PathBuf,

    /// Extensions kept after copying (with leading dot)
    pub extensions: Vec<String>,
}

/// Asset set holding every package required by the robot descriptions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackageAssets {
    pub directory: String,
    pub extensions: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            anchor_package: "virtual_maize_field".to_string(),
            world_file: PathBuf::from("worlds/generated.world"),
            seed_pattern: "**/*.launch".to_string(),
            chainable_extensions: strings(&["xacro", "urdf"]),
            skipped_extensions: strings(&["so"]),
            output_dir: PathBuf::from("simulation_files"),
            runtime: RuntimeAssets::default(),
            viewer: ViewerAssets::default(),
            robot_packages: PackageAssets::default(),
        }
    }
}

impl Default for RuntimeAssets {
    fn default() -> Self {
        Self {
            folders: strings(&["Media", "map", "worlds", "launch"]),
        }
    }
}

impl Default for ViewerAssets {
    fn default() -> Self {
        Self {
            directory: "gzweb".to_string(),
            folders: strings(&["models", "Media/models"]),
            material_scripts: PathBuf::from("media/materials/scripts"),
            extensions: strings(VIEWER_EXTENSIONS),
        }
    }
}

impl Default for PackageAssets {
    fn default() -> Self {
        let mut extensions = strings(VIEWER_EXTENSIONS);
        extensions.push(".xml".to_string());
        Self {
            directory: "robot_packages".to_string(),
            extensions,
        }
    }
}

impl BundleConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str, origin: &Path) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| SimBundleError::ConfigParseFailed {
            path: origin.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Load configuration
    ///
    /// An explicitly given file must exist. Without one, `simbundle.yaml` in
    /// `cwd` is used when present, defaults otherwise.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) if !path.is_file() => {
                return Err(SimBundleError::ConfigNotFound {
                    path: path.display().to_string(),
                });
            }
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = cwd.join(CONFIG_FILE);
                if !candidate.is_file() {
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let yaml =
            std::fs::read_to_string(&path).map_err(|e| SimBundleError::ConfigReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Self::from_yaml(&yaml, &path)
    }

    /// True if `path` has one of the chainable description extensions
    pub fn is_chainable(&self, path: &Path) -> bool {
        has_extension(path, &self.chainable_extensions)
    }

    /// True if a reference value ends in a skip-listed extension
    pub fn is_skipped_reference(&self, reference: &str) -> bool {
        self.skipped_extensions
            .iter()
            .any(|ext| reference.ends_with(&format!(".{ext}")))
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}
