//! Bundle command implementation
//!
//! Validates the workspace and, when no check reports an ERROR, stages the
//! simulation assets into the output directory.

use std::path::PathBuf;

use console::Style;

use crate::cli::BundleArgs;
use crate::copier::pipeline::{StageOptions, StageSummary, stage_assets};
use crate::error::{Result, SimBundleError};
use crate::ui::display::heading;
use crate::ui::{CopyReporter, InteractiveCopyReporter, SilentCopyReporter};

use super::check::validate;
use super::helpers::open_workspace;

/// Run bundle command
pub fn run(anchor: Option<String>, config: Option<PathBuf>, args: BundleArgs) -> Result<()> {
    let workspace = open_workspace(anchor, config.as_deref())?;

    if !validate(&workspace).passed() {
        println!("{}", Style::new().red().apply_to("No files were copied."));
        return Err(SimBundleError::ValidationFailed);
    }

    let output = args
        .output
        .unwrap_or_else(|| workspace.config.output_dir.clone());
    let options = StageOptions {
        clean: !args.no_clean,
    };

    let mut reporter: Box<dyn CopyReporter> = if args.quiet {
        Box::new(SilentCopyReporter)
    } else {
        println!();
        println!("{}", heading("Copying simulation files"));
        Box::new(InteractiveCopyReporter::new())
    };

    let summary = stage_assets(&workspace, &output, options, reporter.as_mut())?;
    display_summary(&summary, &output);
    Ok(())
}

fn display_summary(summary: &StageSummary, output: &std::path::Path) {
    println!(
        "{} {} package(s) into '{}' ({} copied, {} up to date, {} removed)",
        Style::new().green().bold().apply_to("Staged"),
        summary.packages.len(),
        output.display(),
        summary.stats.copied,
        summary.stats.skipped,
        summary.removed
    );
}
