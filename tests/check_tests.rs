//! Integration tests for the check command

mod common;

use common::{TestWorkspace, collada};
use predicates::prelude::*;

#[test]
fn test_check_valid_workspace() {
    let ws = TestWorkspace::valid();

    ws.cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found workspace source folder"))
        .stdout(predicate::str::contains("Found gazebo material resource folder"))
        .stdout(predicate::str::contains("World file is correct."))
        .stdout(predicate::str::contains(
            "Need resources from [\"my_robot\", \"robot_meshes\"]",
        ))
        .stdout(predicate::str::contains("All 2 mesh files are valid"))
        .stdout(predicate::str::contains("Workspace is valid."));
}

#[test]
fn test_check_without_anchor_package() {
    let ws = TestWorkspace::new();

    ws.cmd()
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Cannot find package 'virtual_maize_field'",
        ))
        .stdout(predicate::str::contains("Find gazebo resources").not())
        .stderr(predicate::str::contains("Error: Workspace validation failed"));
}

#[test]
fn test_check_without_ros_package_path() {
    let ws = TestWorkspace::valid();

    ws.cmd()
        .arg("check")
        .env_remove("ROS_PACKAGE_PATH")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Cannot find package"));
}

#[test]
fn test_check_without_gazebo() {
    let ws = TestWorkspace::valid();

    ws.cmd()
        .arg("check")
        .env_remove("GAZEBO_RESOURCE_PATH")
        .assert()
        .failure()
        .stdout(predicate::str::contains("GAZEBO_RESOURCE_PATH is not set"))
        .stdout(predicate::str::contains("World file").not());
}

#[test]
fn test_check_empty_materials_in_world() {
    let ws = TestWorkspace::valid();
    ws.write(
        "virtual_maize_field/worlds/generated.world",
        "<sdf><world><model><materials></materials></model></world></sdf>",
    );

    ws.cmd()
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("empty <materials></materials> tags"));
}

#[test]
fn test_check_missing_dependency_is_a_warning() {
    let ws = TestWorkspace::valid();
    std::fs::remove_file(ws.src.join("robot_meshes/meshes/wheel.stl")).unwrap();

    ws.cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Could not find all dependencies of the xacro and urdf files",
        ))
        .stdout(predicate::str::contains("Workspace is valid with 1 warning(s)."));
}

#[test]
fn test_check_misplaced_texture() {
    let ws = TestWorkspace::valid();
    ws.write(
        "virtual_maize_field/models/maize/meshes/maize.dae",
        &collada("maize.png"),
    );

    ws.cmd()
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Texture 'maize.png'"))
        .stdout(predicate::str::contains("materials/textures"));
}

#[test]
fn test_check_with_anchor_flag() {
    let ws = TestWorkspace::valid();
    ws.add_package("other_field");

    ws.cmd()
        .args(["check", "--anchor", "other_field"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Could not find your generated .world file"));
}

#[test]
fn test_check_with_config_file() {
    let ws = TestWorkspace::valid();
    ws.write("custom_field/package.xml", "<package><name>custom_field</name></package>");
    ws.write("custom_field/worlds/generated.world", common::WORLD);
    std::fs::write(ws.out("simbundle.yaml"), "anchor_package: custom_field\n").unwrap();

    ws.cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("World file is correct."));
}

#[test]
fn test_check_rejects_unknown_config_keys() {
    let ws = TestWorkspace::valid();
    std::fs::write(ws.out("simbundle.yaml"), "anchor: custom_field\n").unwrap();

    ws.cmd()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse configuration file"));
}
