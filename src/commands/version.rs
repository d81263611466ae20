//! Version command implementation

use crate::error::Result;
use crate::registry::{PACKAGE_PATH_VAR, RosPackageIndex};
use crate::workspace::GAZEBO_RESOURCE_VAR;

/// Run version command
pub fn run() -> Result<()> {
    println!("simbundle {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("  Profile: {}", build_profile());
    println!();
    println!("Environment:");
    for var in [PACKAGE_PATH_VAR, GAZEBO_RESOURCE_VAR] {
        let value = std::env::var(var).unwrap_or_else(|_| "(not set)".to_string());
        println!("  {}: {}", var, value);
    }
    let index = RosPackageIndex::from_env();
    if index.is_empty() {
        println!("  Packages found: none (is the workspace sourced?)");
    } else {
        println!("  Packages found: {}", index.len());
    }

    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
