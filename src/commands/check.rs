//! Check command implementation
//!
//! Runs the workspace checks and prints one status line per check.

use std::path::PathBuf;

use console::Style;

use crate::error::{Result, SimBundleError};
use crate::ui::display::{heading, status_line};
use crate::validation::{ValidationReport, Validator};
use crate::workspace::SimWorkspace;

use super::helpers::open_workspace;

/// Run check command
pub fn run(anchor: Option<String>, config: Option<PathBuf>) -> Result<()> {
    let workspace = open_workspace(anchor, config.as_deref())?;
    let report = validate(&workspace);
    if !report.passed() {
        return Err(SimBundleError::ValidationFailed);
    }

    let style = Style::new().green().bold();
    match report.warnings() {
        0 => println!("{}", style.apply_to("Workspace is valid.")),
        n => println!(
            "{}",
            style.apply_to(format!("Workspace is valid with {} warning(s).", n))
        ),
    }
    Ok(())
}

/// Validate `workspace`, printing each outcome as it arrives
pub fn validate(workspace: &SimWorkspace) -> ValidationReport {
    println!("{}", heading("Validating workspace"));
    Validator::standard().validate_all(workspace, |name, outcome| {
        println!("{}", status_line(outcome.severity, name, &outcome.message));
    })
}
