use regex::Regex;
use std::fmt;

/// Numeric core followed by a hyphen-introduced pre-release qualifier
const PRERELEASE_PATTERN: &str = r"[0-9.]{5,}-[A-Za-z0-9_.]+";

/// Numeric core, optional pre-release qualifier, then a plus-introduced build qualifier
const BUILD_PATTERN: &str = r"[0-9.]{5,}(-[A-Za-z0-9_.]+)?\+[A-Za-z0-9_.]+";

/// Tag identifier assembled from a prefix, a version and a suffix.
///
/// The three parts are kept as given; the name is always recomputed from
/// their trimmed forms, so it can never drift from the parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagName {
    prefix: String,
    version: String,
    suffix: String,
}

impl TagName {
    /// Create a new tag name from its parts
    pub fn new(
        prefix: impl Into<String>,
        version: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        TagName {
            prefix: prefix.into(),
            version: version.into(),
            suffix: suffix.into(),
        }
    }

    /// Concatenation of the trimmed parts; no separator is inserted
    /// Example: ("v", " 1.2.3 ", "-rc") -> "v1.2.3-rc"
    pub fn name(&self) -> String {
        format!(
            "{}{}{}",
            self.prefix.trim(),
            self.version.trim(),
            self.suffix.trim()
        )
    }

    /// The version part exactly as extracted
    pub fn version(&self) -> &str {
        &self.version
    }

    /// True when the raw version carries a pre-release qualifier (`1.2.3-beta`).
    /// Only the part before build metadata is inspected.
    pub fn is_prerelease(&self) -> bool {
        let before_build = self
            .version
            .split_once('+')
            .map_or(self.version.as_str(), |(head, _)| head);
        matches_version(PRERELEASE_PATTERN, before_build)
    }

    /// True when the raw version carries build metadata (`1.2.3+001`)
    pub fn is_build(&self) -> bool {
        matches_version(BUILD_PATTERN, &self.version)
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

fn matches_version(pattern: &str, version: &str) -> bool {
    Regex::new(pattern)
        .map(|re| re.is_match(version))
        .unwrap_or(false)
}
