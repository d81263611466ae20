//! The workspace checks run before staging

use std::path::Path;

use crate::error::SimBundleError;
use crate::resolver::resolve_workspace;
use crate::workspace::SimWorkspace;
use crate::workspace::path::find_files;
use crate::xml::{self, COLLADA_NS};

use super::{Check, CheckOutcome};

const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg"];
const TEXTURE_FOLDER: &str = "../materials/textures";

/// The anchor package sits inside a workspace `src` folder
pub struct FindWorkspace;

impl Check for FindWorkspace {
    fn name(&self) -> &'static str {
        "Find workspace"
    }

    fn run(&self, workspace: &SimWorkspace) -> CheckOutcome {
        let anchor = &workspace.config.anchor_package;
        match workspace.src_folder() {
            Ok(src) => CheckOutcome::ok(format!(
                "Found workspace source folder in '{}'",
                src.display()
            )),
            Err(SimBundleError::PackageNotFound { .. }) => CheckOutcome::error(format!(
                "Cannot find package '{anchor}'. Did you clone the {anchor} package into your \
                 workspace and did a 'catkin_make'? Did you source your workspace?"
            )),
            Err(SimBundleError::WorkspaceNotFound { .. }) => CheckOutcome::error(format!(
                "Cannot find your workspace 'src' folder. Did you place the '{anchor}' package \
                 in your 'src' folder?"
            )),
            Err(e) => CheckOutcome::error(e.to_string()),
        }
    }
}

/// Gazebo's material scripts can be found through `GAZEBO_RESOURCE_PATH`
pub struct FindGazeboResources;

impl Check for FindGazeboResources {
    fn name(&self) -> &'static str {
        "Find gazebo resources"
    }

    fn run(&self, workspace: &SimWorkspace) -> CheckOutcome {
        match workspace.material_resources() {
            Ok(folder) => CheckOutcome::ok(format!(
                "Found gazebo material resource folder in '{}'",
                folder.display()
            )),
            Err(SimBundleError::EnvVarMissing { name }) => CheckOutcome::error(format!(
                "{name} is not set! Did you source Gazebo in your .bashrc file? If not, try \
                 adding 'source /usr/share/gazebo/setup.bash' to your bash file."
            )),
            Err(SimBundleError::ResourceFolderNotFound { .. }) => CheckOutcome::error(
                "Could not find the gazebo material resource folder! Check your Gazebo \
                 installation.",
            ),
            Err(e) => CheckOutcome::error(e.to_string()),
        }
    }
}

/// The generated world file exists and is usable by the web viewer
pub struct WorldFile;

impl Check for WorldFile {
    fn name(&self) -> &'static str {
        "World file"
    }

    fn run(&self, workspace: &SimWorkspace) -> CheckOutcome {
        let world_file = match workspace.anchor_path() {
            Ok(anchor) => anchor.join(&workspace.config.world_file),
            Err(e) => return CheckOutcome::error(e.to_string()),
        };

        if !world_file.is_file() {
            return CheckOutcome::error(format!(
                "Could not find your generated .world file at '{}'. Generate a world file by \
                 'rosrun {} create_task_1_mini'",
                world_file.display(),
                workspace.config.anchor_package
            ));
        }

        let textless = xml::read_document(&world_file)
            .and_then(|text| xml::has_textless_element(&text, b"materials", &world_file));
        match textless {
            Ok(false) => CheckOutcome::ok("World file is correct."),
            Ok(true) => CheckOutcome::error(format!(
                "The world file '{}' contains empty <materials></materials> tags. This gives a \
                 problem in visualisation of the environment. Update the {} package to the \
                 newest version or manually remove the empty <materials></materials> tags from \
                 the world file.",
                world_file.display(),
                workspace.config.anchor_package
            )),
            Err(e) => CheckOutcome::error(e.to_string()),
        }
    }
}

/// Every description file reference resolves
pub struct XacroDependencies;

impl Check for XacroDependencies {
    fn name(&self) -> &'static str {
        "Xacro dependencies"
    }

    fn run(&self, workspace: &SimWorkspace) -> CheckOutcome {
        match resolve_workspace(workspace) {
            Ok(deps) => CheckOutcome::ok(format!(
                "Need resources from {:?}",
                deps.package_list()
            )),
            Err(e @ SimBundleError::ReferencedFileNotFound { .. }) => CheckOutcome::warning(
                format!("Could not find all dependencies of the xacro and urdf files: '{e}'."),
            ),
            Err(e) if e.is_syntax_error() => {
                CheckOutcome::warning(format!("Syntax of some files is not correct: '{e}'."))
            }
            Err(e @ SimBundleError::PackageNotFound { .. }) => CheckOutcome::warning(format!(
                "Could not find all packages required by the xacro and urdf files: '{e}'."
            )),
            Err(e) => CheckOutcome::error(e.to_string()),
        }
    }
}

/// Mesh textures live in the conventional `materials/textures` folder
pub struct MeshFiles;

impl Check for MeshFiles {
    fn name(&self) -> &'static str {
        "Mesh files"
    }

    fn run(&self, workspace: &SimWorkspace) -> CheckOutcome {
        let meshes = match workspace
            .src_folder()
            .and_then(|src| find_files(&src, "**/*.dae"))
        {
            Ok(meshes) => meshes,
            Err(e) => return CheckOutcome::error(e.to_string()),
        };

        for mesh in &meshes {
            match misplaced_texture(mesh) {
                Ok(None) => {}
                Ok(Some(texture)) => return misplaced_texture_outcome(mesh, &texture),
                Err(e) => return CheckOutcome::error(e.to_string()),
            }
        }

        CheckOutcome::ok(format!("All {} mesh files are valid", meshes.len()))
    }
}

fn is_image(reference: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|ext| reference.ends_with(ext))
}

/// First image referenced by `mesh` outside the texture folder
fn misplaced_texture(mesh: &Path) -> crate::error::Result<Option<String>> {
    let text = xml::read_document(mesh)?;
    let sources = xml::namespaced_texts(&text, COLLADA_NS, b"init_from", mesh)?;
    Ok(sources
        .into_iter()
        .find(|source| is_image(source) && !source.contains(TEXTURE_FOLDER)))
}

fn misplaced_texture_outcome(mesh: &Path, texture: &str) -> CheckOutcome {
    let model = mesh
        .parent()
        .and_then(Path::parent)
        .unwrap_or(mesh)
        .display()
        .to_string();
    let texture_name = texture.rsplit('/').next().unwrap_or(texture);
    let mesh_name = mesh
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    CheckOutcome::error(format!(
        "Texture '{texture_name}' in '{model}' should be placed in the folder \
         '{model}/materials/textures'. Move the file to this folder and edit the \
         '{mesh_name}' file."
    ))
}
