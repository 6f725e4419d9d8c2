//! Version extraction strategies
//!
//! Each strategy reads one file from the workspace and derives a version
//! string from it:
//!
//! - [package]: the `version` field of a `package.json` manifest
//! - [pattern]: a caller-supplied regular expression applied to any file
//! - [docker]: a built-in pattern matching a `LABEL version=...` line of a Dockerfile
//!
//! Strategies only fail on I/O and configuration problems. A pattern that
//! does not match yields an [ExtractedVersion] with no version; whether that
//! is fatal is decided by the caller.

pub mod docker;
pub mod package;
pub mod pattern;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use regex::{Regex, RegexBuilder};

use crate::error::{AutotagError, Result};

/// One file read from disk, optionally paired with the pattern to search it with
#[derive(Debug, Clone)]
pub struct VersionSource {
    pub path: PathBuf,
    pub content: String,
    pub pattern: Option<String>,
}

impl VersionSource {
    /// Read `path` into memory. Invalid UTF-8 sequences are replaced, not rejected.
    pub fn read(path: impl Into<PathBuf>, pattern: Option<&str>) -> Result<Self> {
        let path = path.into();
        let bytes = fs::read(&path)?;
        let content = String::from_utf8_lossy(&bytes).into_owned();
        Ok(VersionSource {
            path,
            content,
            pattern: pattern.map(str::to_string),
        })
    }

    /// Search the content with the source's pattern.
    ///
    /// The pattern is compiled case-insensitive and multi-line. The version is
    /// taken from a group named `version` when the pattern defines one,
    /// otherwise from the first capture group. The captured text is returned
    /// untrimmed.
    pub fn find_version(&self) -> Result<ExtractedVersion> {
        let pattern = self.pattern.as_deref().ok_or_else(|| {
            AutotagError::config(format!("No pattern supplied for {}", self.path.display()))
        })?;
        let re = compile_pattern(pattern)?;

        let version = re.captures(&self.content).and_then(|captures| {
            let has_named_group = re.capture_names().flatten().any(|n| n == "version");
            let group = if has_named_group {
                captures.name("version")
            } else {
                captures.get(1)
            };
            group.map(|m| m.as_str().to_string())
        });

        Ok(ExtractedVersion { version })
    }
}

/// Compile a version pattern with case-insensitive, multi-line semantics
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()?)
}

/// Outcome of running a strategy
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedVersion {
    pub version: Option<String>,
}

impl ExtractedVersion {
    pub fn found(version: impl Into<String>) -> Self {
        ExtractedVersion {
            version: Some(version.into()),
        }
    }

    pub fn not_found() -> Self {
        ExtractedVersion { version: None }
    }

    /// True iff a match was located
    pub fn is_found(&self) -> bool {
        self.version.is_some()
    }
}

/// Available extraction strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    Package,
    Docker,
    Regex,
}

impl Strategy {
    /// Pick the strategy for a run.
    ///
    /// A non-blank pattern always selects [Strategy::Regex]. Otherwise the
    /// declared name is used, defaulting to [Strategy::Package].
    pub fn select(declared: Option<&str>, pattern: Option<&str>) -> Result<Self> {
        if pattern.map(|p| !p.trim().is_empty()).unwrap_or(false) {
            return Ok(Strategy::Regex);
        }

        match declared.map(str::trim).filter(|s| !s.is_empty()) {
            Some(name) => name.parse(),
            None => Ok(Strategy::default()),
        }
    }

    /// Run this strategy against `root`, resolved relative to `workspace`
    pub fn extract(
        &self,
        workspace: &Path,
        root: &str,
        pattern: Option<&str>,
    ) -> Result<ExtractedVersion> {
        let root = workspace.join(root);
        match self {
            Strategy::Package => package::extract(&root),
            Strategy::Docker => docker::extract(&root),
            Strategy::Regex => {
                let pattern = pattern.filter(|p| !p.trim().is_empty()).ok_or_else(|| {
                    AutotagError::config("The regex strategy requires a regex_pattern")
                })?;
                pattern::extract(&root, pattern)
            }
        }
    }
}

impl FromStr for Strategy {
    type Err = AutotagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "package" => Ok(Strategy::Package),
            "docker" => Ok(Strategy::Docker),
            "regex" => Ok(Strategy::Regex),
            other => Err(AutotagError::config(format!(
                "\"{}\" is not a recognized tagging strategy. Choose from: 'package' (package.json), \
                 'docker' (uses Dockerfile), or 'regex' (regular expression).",
                other
            ))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Package => "package",
            Strategy::Docker => "docker",
            Strategy::Regex => "regex",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn source_with(content: &str, pattern: &str) -> VersionSource {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        VersionSource::read(file.path(), Some(pattern)).unwrap()
    }

    #[test]
    fn test_select_defaults_to_package() {
        assert_eq!(Strategy::select(None, None).unwrap(), Strategy::Package);
        assert_eq!(Strategy::select(Some("  "), Some("")).unwrap(), Strategy::Package);
    }

    #[test]
    fn test_select_pattern_overrides_declared_strategy() {
        let strategy = Strategy::select(Some("docker"), Some("version: (.+)")).unwrap();
        assert_eq!(strategy, Strategy::Regex);
    }

    #[test]
    fn test_select_normalizes_name() {
        assert_eq!(Strategy::select(Some(" Docker "), None).unwrap(), Strategy::Docker);
    }

    #[test]
    fn test_select_unknown_strategy_is_config_error() {
        let err = Strategy::select(Some("gradle"), None).unwrap_err();
        assert!(matches!(err, AutotagError::Config(_)));
        assert!(err.to_string().contains("gradle"));
    }

    #[test]
    fn test_named_group_wins_over_first_group() {
        let source = source_with("v=1 version=2.3.4", r"v=(\d) version=(?P<version>[\d.]+)");
        assert_eq!(source.find_version().unwrap(), ExtractedVersion::found("2.3.4"));
    }

    #[test]
    fn test_first_group_used_without_named_group() {
        let source = source_with("APP_VERSION = 0.9.1\n", r"^app_version = ([\d.]+)$");
        assert_eq!(source.find_version().unwrap(), ExtractedVersion::found("0.9.1"));
    }

    #[test]
    fn test_captured_version_is_not_trimmed() {
        let source = source_with("version:  1.0.0 ;", r"version:(.*);");
        assert_eq!(source.find_version().unwrap().version.as_deref(), Some("  1.0.0 "));
    }

    #[test]
    fn test_no_match_is_not_an_error() {
        let source = source_with("nothing here", r"version=(\d+)");
        let extracted = source.find_version().unwrap();
        assert!(!extracted.is_found());
    }

    #[test]
    fn test_invalid_pattern_is_pattern_error() {
        let source = source_with("version=1", r"version=(\d+");
        assert!(matches!(source.find_version(), Err(AutotagError::Pattern(_))));
    }

    #[test]
    fn test_strategy_display_round_trips() {
        for strategy in [Strategy::Package, Strategy::Docker, Strategy::Regex] {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
    }
}
