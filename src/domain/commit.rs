/// One commit of a comparison range, as needed for changelog rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub sha: String,
    pub message: String,
    /// Login of the linked account; absent when the commit author has no account
    pub author: Option<String>,
}

impl CommitSummary {
    /// Create a commit without a linked author
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        CommitSummary {
            sha: sha.into(),
            message: message.into(),
            author: None,
        }
    }

    /// Attach the author's login
    pub fn with_author(mut self, login: impl Into<String>) -> Self {
        self.author = Some(login.into());
        self
    }

    /// Author login, or an empty string when unknown
    pub fn author_login(&self) -> &str {
        self.author.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_without_author() {
        let commit = CommitSummary::new("abc123", "fix: typo");
        assert_eq!(commit.author, None);
        assert_eq!(commit.author_login(), "");
    }

    #[test]
    fn test_commit_with_author() {
        let commit = CommitSummary::new("abc123", "feat: login").with_author("octocat");
        assert_eq!(commit.author_login(), "octocat");
    }
}
