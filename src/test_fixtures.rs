//! Test fixtures for building throwaway catkin workspaces.
//!
//! ```ignore
//! use crate::test_fixtures::CatkinFixture;
//!
//! let ws = CatkinFixture::new();
//! let bot = ws.add_package("my_robot");
//! ws.write("my_robot/urdf/bot.xacro", "<robot/>");
//! let registry = ws.registry();
//! ```

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::registry::RosPackageIndex;

/// Returns an absolute directory for temp dirs, so they never land under the
/// current working directory when `TMPDIR` is relative.
fn temp_dir_base() -> PathBuf {
    let base = std::env::temp_dir();
    if base.is_absolute() {
        base
    } else {
        PathBuf::from("/tmp")
    }
}

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(temp_dir_base()).expect("Failed to create temp directory")
}

/// Write `content` to `path`, creating parent directories.
///
/// # Panics
///
/// Panics on any IO failure.
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// Catkin workspace laid out as `<temp>/catkin_ws/src/<package>`
pub struct CatkinFixture {
    pub temp: TempDir,
    pub src: PathBuf,
}

impl CatkinFixture {
    /// Create an empty workspace
    ///
    /// # Panics
    ///
    /// Panics if the workspace cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let temp = create_temp_dir();
        let src = temp.path().join("catkin_ws").join("src");
        std::fs::create_dir_all(&src).expect("Failed to create src directory");
        Self { temp, src }
    }

    /// Create a package with a minimal `package.xml`
    pub fn add_package(&self, name: &str) -> PathBuf {
        let dir = self.src.join(name);
        write_file(
            &dir.join("package.xml"),
            &format!(
                "<?xml version=\"1.0\"?>\n<package format=\"2\">\n  <name>{name}</name>\n  \
                 <version>0.0.1</version>\n</package>\n"
            ),
        );
        dir
    }

    /// Write a file relative to the `src` folder
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.src.join(relative);
        write_file(&path, content);
        path
    }

    /// Package index crawled from the `src` folder
    #[must_use]
    pub fn registry(&self) -> RosPackageIndex {
        RosPackageIndex::crawl(&[self.src.clone()])
    }
}

impl Default for CatkinFixture {
    fn default() -> Self {
        Self::new()
    }
}
