//! Console line formatting

use std::path::Path;

use console::Style;

use crate::validation::Severity;

/// Width of the check name column
const NAME_WIDTH: usize = 20;

fn severity_style(severity: Severity) -> (Style, &'static str) {
    match severity {
        Severity::Ok => (Style::new().green(), "\u{2714}"),
        Severity::Warning => (Style::new().yellow(), "?"),
        Severity::Error => (Style::new().red(), "\u{2718}"),
    }
}

/// One validation line: `<sign> <name>\t: <message>`
pub fn status_line(severity: Severity, name: &str, message: &str) -> String {
    let (style, sign) = severity_style(severity);
    style
        .apply_to(format!("{sign} {name:<NAME_WIDTH$}\t: {message}"))
        .to_string()
}

/// One copy step: `✔ <src> -> <dst>`
pub fn copy_line(src: &Path, dst: &Path) -> String {
    Style::new()
        .green()
        .apply_to(format!(
            "\u{2714} {} -> {}",
            src.display(),
            dst.display()
        ))
        .to_string()
}

/// Bold section heading
pub fn heading(text: &str) -> String {
    Style::new().bold().apply_to(text).to_string()
}
