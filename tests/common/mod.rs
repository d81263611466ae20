//! Common test utilities for Simbundle integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

pub const WORLD: &str = r#"<?xml version="1.0"?>
<sdf version="1.6">
  <world name="default">
    <include><uri>model://sun</uri></include>
  </world>
</sdf>
"#;

pub const LAUNCH: &str = r#"<launch>
  <param name="robot_description"
         command="$(find xacro)/xacro '$(find my_robot)/urdf/robot.urdf.xacro'"/>
</launch>
"#;

pub const ROBOT: &str = r#"<robot xmlns:xacro="http://www.ros.org/wiki/xacro" name="robot">
  <xacro:include filename="$(find my_robot)/urdf/wheel.xacro"/>
  <link name="base"><visual><geometry>
    <mesh filename="package://my_robot/meshes/base.dae"/>
  </geometry></visual></link>
  <gazebo><plugin name="control" filename="libgazebo_ros_control.so"/></gazebo>
</robot>
"#;

pub const WHEEL: &str = r#"<robot xmlns:xacro="http://www.ros.org/wiki/xacro">
  <mesh filename="package://robot_meshes/meshes/wheel.stl"/>
</robot>
"#;

pub fn collada(init_from: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<COLLADA xmlns="http://www.collada.org/2005/11/COLLADASchema" version="1.4.1">
  <library_images>
    <image id="texture"><init_from>{init_from}</init_from></image>
  </library_images>
</COLLADA>
"#
    )
}

/// A sourced catkin workspace plus a Gazebo installation
///
/// ```text
/// <temp>/catkin_ws/src/
///   virtual_maize_field/   worlds, models, Media, map, launch
///   my_robot/              robot description and meshes
///   robot_meshes/          wheel meshes
/// <temp>/gazebo/media/materials/scripts/
/// <temp>/run/              working directory
/// ```
pub struct TestWorkspace {
    pub temp: TempDir,
    pub src: PathBuf,
    pub gazebo: PathBuf,
    /// Working directory of the binary
    pub cwd: PathBuf,
}

impl TestWorkspace {
    /// Create an empty workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let src = temp.path().join("catkin_ws").join("src");
        let gazebo = temp.path().join("gazebo");
        let cwd = temp.path().join("run");
        std::fs::create_dir_all(&src).expect("Failed to create src directory");
        std::fs::create_dir_all(&cwd).expect("Failed to create working directory");
        Self {
            temp,
            src,
            gazebo,
            cwd,
        }
    }

    /// Create a complete, valid simulation workspace
    pub fn valid() -> Self {
        let ws = Self::new();
        ws.add_package("virtual_maize_field");
        ws.write("virtual_maize_field/worlds/generated.world", WORLD);
        ws.write("virtual_maize_field/map/map.yaml", "image: map.png\n");
        ws.write("virtual_maize_field/launch/simulation.launch", LAUNCH);
        ws.write(
            "virtual_maize_field/models/maize/model.sdf",
            "<sdf version=\"1.6\"/>",
        );
        ws.write(
            "virtual_maize_field/models/maize/meshes/maize.dae",
            &collada("../materials/textures/maize.png"),
        );
        ws.write("virtual_maize_field/models/maize/materials/textures/maize.png", "png");
        ws.write("virtual_maize_field/models/maize/README.md", "maize");
        ws.write(
            "virtual_maize_field/Media/models/ground/model.config",
            "<model/>",
        );

        ws.add_package("my_robot");
        ws.write("my_robot/urdf/robot.urdf.xacro", ROBOT);
        ws.write("my_robot/urdf/wheel.xacro", WHEEL);
        ws.write("my_robot/meshes/base.dae", &collada("base_geometry"));
        ws.write("my_robot/CMakeLists.txt", "project(my_robot)\n");

        ws.add_package("robot_meshes");
        ws.write("robot_meshes/meshes/wheel.stl", "solid wheel");

        ws.write_gazebo("media/materials/scripts/gazebo.material", "material Gazebo/Grey {}");
        ws
    }

    /// Create a package with a minimal `package.xml`
    pub fn add_package(&self, name: &str) -> PathBuf {
        self.write(
            &format!("{name}/package.xml"),
            &format!("<package format=\"2\"><name>{name}</name></package>\n"),
        )
    }

    /// Write a file relative to the `src` folder
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        write_file(self.src.join(relative), content)
    }

    /// Write a file relative to the Gazebo resource directory
    pub fn write_gazebo(&self, relative: &str, content: &str) -> PathBuf {
        write_file(self.gazebo.join(relative), content)
    }

    /// Path relative to the working directory of the binary
    pub fn out(&self, relative: &str) -> PathBuf {
        self.cwd.join(relative)
    }

    /// Simbundle command running in this workspace's environment
    pub fn cmd(&self) -> Command {
        let mut cmd = simbundle_cmd();
        cmd.current_dir(&self.cwd)
            .env("ROS_PACKAGE_PATH", &self.src)
            .env("GAZEBO_RESOURCE_PATH", &self.gazebo)
            .env_remove("SIMBUNDLE_CONFIG");
        cmd
    }
}

fn write_file(path: PathBuf, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(&path, content).expect("Failed to write file");
    path
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn simbundle_cmd() -> Command {
    Command::cargo_bin("simbundle").unwrap()
}
