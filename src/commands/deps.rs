//! Deps command implementation
//!
//! Prints the packages required by the description files used in launch
//! files. With `--verbose`, also prints every parsed description file and
//! resolved resource.

use std::collections::BTreeSet;
use std::path::PathBuf;

use console::Style;

use crate::error::Result;
use crate::resolver::{DependencySet, resolve_workspace};

use super::helpers::open_workspace;

/// Run deps command
pub fn run(anchor: Option<String>, config: Option<PathBuf>, verbose: bool) -> Result<()> {
    let workspace = open_workspace(anchor, config.as_deref())?;
    let deps = resolve_workspace(&workspace)?;
    display_dependencies(&deps, verbose);
    Ok(())
}

fn display_dependencies(deps: &DependencySet, verbose: bool) {
    if deps.packages.is_empty() {
        println!("No packages required.");
    } else {
        println!("Required packages ({}):", deps.packages.len());
        for package in &deps.packages {
            println!("  {}", Style::new().bold().yellow().apply_to(package));
        }
    }

    if verbose {
        display_files("Description files", &deps.descriptions);
        display_files("Resource files", &deps.resources);
        println!();
        println!(
            "{} {}",
            Style::new().bold().apply_to("Parse rounds:"),
            deps.rounds
        );
    }
}

fn display_files(title: &str, files: &BTreeSet<PathBuf>) {
    println!();
    println!(
        "{}",
        Style::new()
            .bold()
            .apply_to(format!("{} ({}):", title, files.len()))
    );
    for file in files {
        println!("  {}", file.display());
    }
}
