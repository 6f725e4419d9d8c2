//! Pure formatting functions for UI output.
//!
//! Inside a GitHub Actions runner messages are emitted as workflow commands
//! so they show up as annotations; elsewhere they are styled for a terminal.

use console::style;

use crate::warning::PublishWarning;

use super::{annotations_enabled, workflow_command};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    if annotations_enabled() {
        println!("{}", workflow_command("error", message));
    } else {
        eprintln!("{} {}", style("ERROR:").red(), message);
    }
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a publish warning to the user.
///
/// # Arguments
/// * `warning` - The warning to display
pub fn display_warning(warning: &PublishWarning) {
    let message = warning.to_string();
    if annotations_enabled() {
        println!("{}", workflow_command("warning", &message));
    } else {
        eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
    }
}

/// Display the tag that is about to be created.
///
/// # Arguments
/// * `tag` - Name of the requested tag
/// * `prerelease` - Whether the version carries a pre-release qualifier
/// * `build` - Whether the version carries build metadata
pub fn display_requested_tag(tag: &str, prerelease: bool, build: bool) {
    let mut flags = Vec::new();
    if prerelease {
        flags.push("prerelease");
    }
    if build {
        flags.push("build");
    }

    if flags.is_empty() {
        display_status(&format!("Attempting to create {} tag.", style(tag).bold()));
    } else {
        display_status(&format!(
            "Attempting to create {} tag ({}).",
            style(tag).bold(),
            flags.join(", ")
        ));
    }
}
