use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::{ExtractedVersion, VersionSource};
use crate::error::{AutotagError, Result};

/// Manifest looked up when the root is a directory
pub const MANIFEST: &str = "package.json";

#[derive(Debug, Deserialize)]
struct PackageManifest {
    version: Option<String>,
}

/// Read the declared version of a `package.json` manifest.
///
/// Unlike the pattern strategies there is no "not found" outcome: a missing
/// file, an unparsable manifest, or a manifest without a version are all errors.
pub fn extract(root: &Path) -> Result<ExtractedVersion> {
    let path = if root.is_dir() {
        root.join(MANIFEST)
    } else {
        root.to_path_buf()
    };

    if !path.is_file() {
        return Err(AutotagError::extraction(format!(
            "{} does not exist at {}.",
            MANIFEST,
            path.display()
        )));
    }

    let source = VersionSource::read(&path, None)?;
    let manifest: PackageManifest = serde_json::from_str(&source.content).map_err(|e| {
        AutotagError::extraction(format!("Could not parse {}: {}", path.display(), e))
    })?;

    debug!(path = %path.display(), version = ?manifest.version, "read package manifest");

    manifest
        .version
        .map(ExtractedVersion::found)
        .ok_or_else(|| {
            AutotagError::extraction(format!("{} declares no version field", path.display()))
        })
}
