use std::path::Path;

use tracing::debug;

use super::{ExtractedVersion, VersionSource};
use crate::error::{AutotagError, Result};

/// Apply a caller-supplied pattern to a single file.
///
/// `root` must name an existing file; a directory is a configuration error.
/// A pattern that does not match returns [ExtractedVersion::not_found].
pub fn extract(root: &Path, pattern: &str) -> Result<ExtractedVersion> {
    if root.is_dir() {
        return Err(AutotagError::config(format!(
            "{} is a directory. The regex tag identification strategy requires a file.",
            root.display()
        )));
    }

    if !root.exists() {
        return Err(AutotagError::extraction(format!(
            "\"{}\" does not exist.",
            root.display()
        )));
    }

    let source = VersionSource::read(root, Some(pattern))?;
    let extracted = source.find_version()?;

    debug!(
        path = %root.display(),
        pattern,
        found = extracted.is_found(),
        "applied version pattern"
    );

    Ok(extracted)
}
