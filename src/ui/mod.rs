//! User interface module - terminal output.
//!
//! Status lines for people are printed here; diagnostics for developers go
//! through `log`.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_file_preview, display_status, display_success, display_warning,
};

use crate::describe::{DescribeInvoker, GitDescribe};

/// Warns up front when git is missing, so a later failure is expected.
///
/// Returns whether the tool is available.
pub fn warn_if_tool_missing(git: &GitDescribe) -> bool {
    if git.is_available() {
        return true;
    }

    display_warning(&format!(
        "\"{}\" binary was not found, version derivation will not work",
        git.tool()
    ));
    false
}
