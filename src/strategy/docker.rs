use std::path::Path;

use super::{pattern, ExtractedVersion};
use crate::error::Result;

/// File looked up when the root is a directory
pub const DOCKERFILE: &str = "Dockerfile";

/// Matches `LABEL version=1.2.3`, quoted or unquoted
pub const LABEL_PATTERN: &str = r#"LABEL\s+version=[\s+]?["']?([0-9.]+)["']?"#;

/// Read the version label of a Dockerfile
pub fn extract(root: &Path) -> Result<ExtractedVersion> {
    if root.is_dir() {
        pattern::extract(&root.join(DOCKERFILE), LABEL_PATTERN)
    } else {
        pattern::extract(root, LABEL_PATTERN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AutotagError;
    use std::fs;
    use tempfile::TempDir;

    fn dockerfile(content: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DOCKERFILE), content).unwrap();
        dir
    }

    #[test]
    fn test_quoted_label() {
        let dir = dockerfile("FROM alpine:3.19\nLABEL version=\"1.4.0\"\n");
        assert_eq!(
            extract(dir.path()).unwrap(),
            ExtractedVersion::found("1.4.0")
        );
    }

    #[test]
    fn test_unquoted_and_lowercase_label() {
        let dir = dockerfile("FROM scratch\nlabel version=2.0.1\n");
        assert_eq!(extract(dir.path()).unwrap().version.as_deref(), Some("2.0.1"));
    }

    #[test]
    fn test_single_quoted_label() {
        let dir = dockerfile("LABEL version='0.3.0'");
        assert_eq!(extract(dir.path()).unwrap().version.as_deref(), Some("0.3.0"));
    }

    #[test]
    fn test_missing_label() {
        let dir = dockerfile("FROM scratch\nLABEL maintainer=\"ops\"\n");
        assert!(!extract(dir.path()).unwrap().is_found());
    }

    #[test]
    fn test_missing_dockerfile() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            extract(dir.path()),
            Err(AutotagError::Extraction(_))
        ));
    }
}
