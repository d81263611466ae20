//! File references inside description documents
//!
//! Two forms are understood, both naming a file inside a package:
//!
//! ```text
//! package://my_robot/meshes/base.dae
//! $(find my_robot)/meshes/base.dae
//! ```

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::BundleConfig;
use crate::error::{Result, SimBundleError};
use crate::registry::PackageRegistry;
use crate::xml;

/// Attribute carrying file references in URDF, xacro and SDF documents
pub const REFERENCE_ATTRIBUTE: &str = "filename";

const PACKAGE_URI_PREFIX: &str = "package://";
const FIND_MACRO_PREFIX: &str = "$(find";

static PACKAGE_URI: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^package://(.+?)/(.+\..+)").unwrap()
});

static FIND_MACRO: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^\$\(find\s+(\S+?)\)/(.+\..+)").unwrap()
});

/// A file inside a package
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceReference {
    pub package: String,
    /// Path relative to the package root
    pub path: String,
}

impl ResourceReference {
    pub fn new(package: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            path: path.into(),
        }
    }

    /// Absolute location of the referenced file (existence is not checked)
    pub fn resolve(&self, registry: &dyn PackageRegistry) -> Result<PathBuf> {
        let root = registry.get_path(&self.package)?;
        let relative = self.path.strip_prefix('/').unwrap_or(&self.path);
        Ok(root.join(relative))
    }

    /// Resolve and require the target to be a file
    pub fn resolve_file(&self, registry: &dyn PackageRegistry, origin: &str) -> Result<PathBuf> {
        let path = self.resolve(registry)?;
        if !path.is_file() {
            return Err(SimBundleError::ReferencedFileNotFound {
                path: path.display().to_string(),
                reference: origin.to_string(),
            });
        }
        Ok(path)
    }
}

fn captured(regex: &Regex, value: &str) -> Option<ResourceReference> {
    let caps = regex.captures(value)?;
    Some(ResourceReference::new(&caps[1], &caps[2]))
}

/// Parse one reference attribute value
///
/// Returns `Ok(None)` for skip-listed binaries such as plugin libraries.
pub fn parse_reference(
    value: &str,
    config: &BundleConfig,
    file: &Path,
) -> Result<Option<ResourceReference>> {
    let malformed = || SimBundleError::MalformedReference {
        reference: value.to_string(),
        file: file.display().to_string(),
    };

    if value.starts_with(PACKAGE_URI_PREFIX) {
        captured(&PACKAGE_URI, value).map(Some).ok_or_else(malformed)
    } else if value.starts_with(FIND_MACRO_PREFIX) {
        captured(&FIND_MACRO, value).map(Some).ok_or_else(malformed)
    } else if config.is_skipped_reference(value) {
        Ok(None)
    } else {
        Err(SimBundleError::UnsupportedReference {
            reference: value.to_string(),
            file: file.display().to_string(),
        })
    }
}

/// Packages and files referenced by one description document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileResources {
    pub packages: Vec<String>,
    pub resources: Vec<PathBuf>,
}

/// Extract and resolve every reference in `file`
pub fn resources_from_file(
    file: &Path,
    registry: &dyn PackageRegistry,
    config: &BundleConfig,
) -> Result<FileResources> {
    let text = xml::read_document(file)?;
    let mut found = FileResources::default();

    for value in xml::attribute_values(&text, REFERENCE_ATTRIBUTE, file)? {
        let Some(reference) = parse_reference(&value, config, file)? else {
            continue;
        };
        let path = reference.resolve_file(registry, &value)?;
        found.packages.push(reference.package);
        found.resources.push(path);
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::CatkinFixture;

    fn parse(value: &str) -> Result<Option<ResourceReference>> {
        parse_reference(value, &BundleConfig::default(), Path::new("bot.xacro"))
    }

    #[test]
    fn test_parse_package_uri() {
        let reference = parse("package://my_robot/meshes/base.dae").unwrap();
        assert_eq!(
            reference,
            Some(ResourceReference::new("my_robot", "meshes/base.dae"))
        );
    }

    #[test]
    fn test_parse_find_macro() {
        let reference = parse("$(find my_robot)/urdf/wheel.urdf.xacro").unwrap();
        assert_eq!(
            reference,
            Some(ResourceReference::new("my_robot", "urdf/wheel.urdf.xacro"))
        );
    }

    #[test]
    fn test_skipped_plugin_library() {
        assert_eq!(parse("libgazebo_ros_control.so").unwrap(), None);
    }

    #[test]
    fn test_malformed_references() {
        for value in ["package://my_robot", "package://my_robot/meshes", "$(find my_robot)"] {
            let err = parse(value).unwrap_err();
            assert!(
                matches!(err, SimBundleError::MalformedReference { .. }),
                "{value} should be malformed, got {err}"
            );
        }
    }

    #[test]
    fn test_unsupported_reference() {
        let err = parse("meshes/base.dae").unwrap_err();
        assert!(matches!(err, SimBundleError::UnsupportedReference { .. }));
        assert!(err.is_syntax_error());
    }

    #[test]
    fn test_package_uri_and_find_macro_resolve_identically() {
        let ws = CatkinFixture::new();
        ws.add_package("my_robot");
        ws.write("my_robot/meshes/base.dae", "<COLLADA/>");
        let registry = ws.registry();

        let uri = parse("package://my_robot/meshes/base.dae")
            .unwrap()
            .unwrap()
            .resolve(&registry)
            .unwrap();
        let find = parse("$(find my_robot)/meshes/base.dae")
            .unwrap()
            .unwrap()
            .resolve(&registry)
            .unwrap();
        assert_eq!(uri, find);
        assert_eq!(uri, ws.src.join("my_robot/meshes/base.dae"));
    }

    #[test]
    fn test_leading_slash_is_stripped() {
        let ws = CatkinFixture::new();
        let root = ws.add_package("my_robot");
        let reference = parse("package://my_robot//meshes/base.dae").unwrap().unwrap();
        assert_eq!(
            reference.resolve(&ws.registry()).unwrap(),
            root.join("meshes/base.dae")
        );
    }

    #[test]
    fn test_resources_from_file() {
        let ws = CatkinFixture::new();
        ws.add_package("my_robot");
        ws.add_package("sensors");
        ws.write("my_robot/meshes/base.dae", "<COLLADA/>");
        ws.write("sensors/urdf/lidar.xacro", "<robot/>");
        let file = ws.write(
            "my_robot/urdf/bot.xacro",
            r#"<robot xmlns:xacro="http://www.ros.org/wiki/xacro">
                <xacro:include filename="$(find sensors)/urdf/lidar.xacro"/>
                <mesh filename="package://my_robot/meshes/base.dae"/>
                <plugin name="control" filename="libgazebo_ros_control.so"/>
            </robot>"#,
        );

        let found = resources_from_file(&file, &ws.registry(), &BundleConfig::default()).unwrap();
        assert_eq!(found.packages, ["sensors", "my_robot"]);
        assert_eq!(
            found.resources,
            [
                ws.src.join("sensors/urdf/lidar.xacro"),
                ws.src.join("my_robot/meshes/base.dae"),
            ]
        );
    }

    #[test]
    fn test_missing_referenced_file() {
        let ws = CatkinFixture::new();
        ws.add_package("my_robot");
        let file = ws.write(
            "my_robot/urdf/bot.xacro",
            r#"<robot><mesh filename="package://my_robot/meshes/gone.stl"/></robot>"#,
        );

        let err = resources_from_file(&file, &ws.registry(), &BundleConfig::default())
            .unwrap_err();
        assert!(
            matches!(err, SimBundleError::ReferencedFileNotFound { ref reference, .. }
                if reference == "package://my_robot/meshes/gone.stl")
        );
    }

    #[test]
    fn test_unknown_package() {
        let ws = CatkinFixture::new();
        let file = ws.write(
            "bot.xacro",
            r#"<robot><mesh filename="package://ghost/meshes/a.stl"/></robot>"#,
        );

        let err = resources_from_file(&file, &ws.registry(), &BundleConfig::default())
            .unwrap_err();
        assert!(matches!(err, SimBundleError::PackageNotFound { .. }));
    }
}
