use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Config file looked up in the workspace when no explicit path is given
pub const CONFIG_FILE: &str = "autotag.toml";

/// Root used when neither `root` nor `package_root` is set
pub const DEFAULT_ROOT: &str = "./";

/// Represents the complete configuration for autotag.
///
/// Every key is optional. Empty strings are treated like unset values so that
/// action inputs which were not provided do not shadow lower layers.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// File or directory the version is extracted from
    pub root: Option<String>,
    /// Alias of `root`, consulted when `root` is empty
    pub package_root: Option<String>,
    /// `package`, `docker` or `regex`
    pub strategy: Option<String>,
    /// Pattern for the regex strategy; setting it forces that strategy
    pub regex_pattern: Option<String>,
    pub tag_prefix: Option<String>,
    pub tag_suffix: Option<String>,
    /// Explicit tag message, replacing the generated changelog
    pub tag_message: Option<String>,
    /// Per-commit changelog template
    pub commit_message_template: Option<String>,
    /// Head revision of the changelog comparison; defaults to the triggering commit
    pub changelog_head: Option<String>,
    /// Resolve everything but create nothing; unset means off
    pub dry_run: Option<bool>,
}

impl Config {
    /// Overlay `overrides` on top of this configuration.
    ///
    /// Non-empty values of `overrides` win; an explicit `dry_run` in `overrides`
    /// wins in either direction.
    pub fn merge(self, overrides: Config) -> Config {
        fn pick(base: Option<String>, over: Option<String>) -> Option<String> {
            over.filter(|v| !v.is_empty()).or(base)
        }

        Config {
            root: pick(self.root, overrides.root),
            package_root: pick(self.package_root, overrides.package_root),
            strategy: pick(self.strategy, overrides.strategy),
            regex_pattern: pick(self.regex_pattern, overrides.regex_pattern),
            tag_prefix: pick(self.tag_prefix, overrides.tag_prefix),
            tag_suffix: pick(self.tag_suffix, overrides.tag_suffix),
            tag_message: pick(self.tag_message, overrides.tag_message),
            commit_message_template: pick(
                self.commit_message_template,
                overrides.commit_message_template,
            ),
            changelog_head: pick(self.changelog_head, overrides.changelog_head),
            dry_run: overrides.dry_run.or(self.dry_run),
        }
    }

    /// Effective extraction root: `root`, then `package_root`, then `./`
    pub fn root(&self) -> &str {
        [&self.root, &self.package_root]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|r| !r.trim().is_empty())
            .unwrap_or(DEFAULT_ROOT)
    }

    pub fn tag_prefix(&self) -> &str {
        self.tag_prefix.as_deref().unwrap_or("")
    }

    pub fn tag_suffix(&self) -> &str {
        self.tag_suffix.as_deref().unwrap_or("")
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run.unwrap_or(false)
    }

    /// Explicit message, trimmed
    pub fn tag_message(&self) -> &str {
        self.tag_message.as_deref().map(str::trim).unwrap_or("")
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter (relative paths resolve against the workspace)
/// 2. `autotag.toml` in the workspace
/// 3. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>, workspace: &Path) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(workspace.join(path))?
    } else {
        let default_path = workspace.join(CONFIG_FILE);
        if default_path.exists() {
            fs::read_to_string(default_path)?
        } else {
            return Ok(Config::default());
        }
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
