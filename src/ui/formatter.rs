//! Pure formatting functions for UI output.
//!
//! The `format_*` functions build the lines; the `display_*` functions print them.
//! Colouring is left to `console`, which drops it when the stream is not a terminal.

use console::style;

const TAG: &str = "describe-version";

/// Single-line error diagnostic, e.g. `describe-version: ERROR: ...`.
pub fn format_error(message: &str) -> String {
    format!("{}: {} {}", style(TAG).bold(), style("ERROR:").red(), message)
}

pub fn format_warning(message: &str) -> String {
    format!("{}: {} {}", style(TAG).bold(), style("⚠ WARNING:").yellow(), message)
}

pub fn format_success(message: &str) -> String {
    format!("{}: {} {}", style(TAG).bold(), style("✓").green(), message)
}

pub fn format_status(message: &str) -> String {
    format!("{}: {} {}", style(TAG).bold(), style("→").yellow(), message)
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Format and print a warning with a yellow marker.
pub fn display_warning(message: &str) {
    eprintln!("{}", format_warning(message));
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{}", format_success(message));
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{}", format_status(message));
}

/// Display generated file content framed by its path (used for dry runs).
///
/// # Arguments
/// * `path` - Where the file would be written
/// * `content` - The rendered file
pub fn display_file_preview(path: &str, content: &str) {
    println!("\n{}", format_file_preview(path, content));
}

/// Heading line followed by the content indented two spaces.
pub fn format_file_preview(path: &str, content: &str) -> String {
    let mut preview = style(format!("Would write {}:", path)).bold().to_string();
    for line in content.lines() {
        preview.push_str(&format!("\n  {}", style(line).cyan()));
    }
    preview
}
