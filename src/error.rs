//! Error types and handling for simbundle
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for simbundle operations
#[derive(Error, Diagnostic, Debug)]
pub enum SimBundleError {
    // Workspace errors
    #[error("Cannot resolve the workspace source folder from: {start}")]
    #[diagnostic(
        code(simbundle::workspace::not_found),
        help("Place the anchor package inside the 'src' folder of your catkin workspace")
    )]
    WorkspaceNotFound { start: String },

    #[error("Directory not found: {path}")]
    #[diagnostic(code(simbundle::workspace::directory_not_found))]
    DirectoryNotFound { path: String },

    #[error("Could not find '{subdir}' in any resource path: {searched}")]
    #[diagnostic(
        code(simbundle::workspace::resource_folder_not_found),
        help("Check your Gazebo installation")
    )]
    ResourceFolderNotFound { subdir: String, searched: String },

    // Environment errors
    #[error("{name} is not set")]
    #[diagnostic(code(simbundle::env::missing))]
    EnvVarMissing { name: String },

    // Registry errors
    #[error("Package '{name}' not found")]
    #[diagnostic(
        code(simbundle::registry::package_not_found),
        help("Build and source your workspace so the package is on ROS_PACKAGE_PATH")
    )]
    PackageNotFound { name: String },

    // Reference errors
    #[error("Cannot match resource path {reference} in {file}")]
    #[diagnostic(code(simbundle::reference::malformed))]
    MalformedReference { reference: String, file: String },

    #[error("Cannot parse {reference} in {file}")]
    #[diagnostic(
        code(simbundle::reference::unsupported),
        help("Use 'package://<package>/<path>' or '$(find <package>)/<path>'")
    )]
    UnsupportedReference { reference: String, file: String },

    #[error("Could not resolve file {path} in {reference}")]
    #[diagnostic(code(simbundle::reference::file_not_found))]
    ReferencedFileNotFound { path: String, reference: String },

    #[error("Failed to parse XML document {path}: {reason}")]
    #[diagnostic(code(simbundle::reference::xml_parse_failed))]
    XmlParseFailed { path: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(simbundle::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(simbundle::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(simbundle::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid glob pattern '{pattern}': {reason}")]
    #[diagnostic(code(simbundle::config::invalid_pattern))]
    InvalidPattern { pattern: String, reason: String },

    // Pipeline errors
    #[error("Workspace validation failed")]
    #[diagnostic(
        code(simbundle::validation::failed),
        help("Fix the errors reported above and run simbundle again")
    )]
    ValidationFailed,

    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(simbundle::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(simbundle::fs::io_error))]
    IoError { message: String },
}

impl SimBundleError {
    /// True for errors caused by the syntax of a description file
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedReference { .. }
                | Self::UnsupportedReference { .. }
                | Self::XmlParseFailed { .. }
        )
    }
}

impl From<std::io::Error> for SimBundleError {
    fn from(err: std::io::Error) -> Self {
        SimBundleError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<walkdir::Error> for SimBundleError {
    fn from(err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        SimBundleError::IoError {
            message: format!("{path}: {err}"),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SimBundleError>;
