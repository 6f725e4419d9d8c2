//! User interface module - reporting for terminals and CI runners.
//!
//! Separates concerns:
//! - `formatter` - Display functions
//! - This module - Detection of the Actions runner and workflow command encoding

use std::env;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_requested_tag, display_status, display_success, display_warning,
};

/// True when running inside a GitHub Actions runner
pub fn annotations_enabled() -> bool {
    env::var("GITHUB_ACTIONS")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Encode a workflow command such as `::warning::message`.
///
/// `%`, carriage returns and newlines are percent-escaped so multi-line
/// messages survive as a single command.
pub fn workflow_command(command: &str, message: &str) -> String {
    format!("::{}::{}", command, escape_data(message))
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
