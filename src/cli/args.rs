use clap::builder::FalseyValueParser;
use clap::Parser;

use crate::config::Config;

/// Command-line arguments.
///
/// Every option can also be supplied through the `INPUT_*` variables a
/// GitHub Actions runner sets for action inputs.
#[derive(Debug, Parser)]
#[command(
    name = "autotag",
    version,
    about = "Create a release tag from the version declared in the repository"
)]
pub struct Args {
    #[arg(short, long, env = "INPUT_CONFIG", help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(long, env = "INPUT_ROOT", help = "File or directory holding the version")]
    pub root: Option<String>,

    #[arg(long, env = "INPUT_PACKAGE_ROOT", help = "Alias of --root")]
    pub package_root: Option<String>,

    #[arg(
        long,
        env = "INPUT_STRATEGY",
        help = "Extraction strategy: package, docker or regex"
    )]
    pub strategy: Option<String>,

    #[arg(
        long,
        env = "INPUT_REGEX_PATTERN",
        help = "Version pattern (forces the regex strategy)"
    )]
    pub regex_pattern: Option<String>,

    #[arg(long, env = "INPUT_TAG_PREFIX", help = "Text placed before the version")]
    pub tag_prefix: Option<String>,

    #[arg(long, env = "INPUT_TAG_SUFFIX", help = "Text placed after the version")]
    pub tag_suffix: Option<String>,

    #[arg(long, env = "INPUT_TAG_MESSAGE", help = "Tag message, replacing the changelog")]
    pub tag_message: Option<String>,

    #[arg(
        long,
        env = "INPUT_COMMIT_MESSAGE_TEMPLATE",
        help = "Changelog entry template ({{number}}, {{message}}, {{author}}, {{sha}})"
    )]
    pub commit_message_template: Option<String>,

    #[arg(long, env = "INPUT_CHANGELOG_HEAD", help = "Head revision of the changelog range")]
    pub changelog_head: Option<String>,

    #[arg(
        long,
        env = "INPUT_DRY_RUN",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = FalseyValueParser::new(),
        help = "Preview what would happen without creating anything"
    )]
    pub dry_run: Option<bool>,
}

impl Args {
    /// The configuration layer given on the command line / by action inputs
    pub fn to_config(&self) -> Config {
        Config {
            root: self.root.clone(),
            package_root: self.package_root.clone(),
            strategy: self.strategy.clone(),
            regex_pattern: self.regex_pattern.clone(),
            tag_prefix: self.tag_prefix.clone(),
            tag_suffix: self.tag_suffix.clone(),
            tag_message: self.tag_message.clone(),
            commit_message_template: self.commit_message_template.clone(),
            changelog_head: self.changelog_head.clone(),
            dry_run: self.dry_run,
        }
    }
}
