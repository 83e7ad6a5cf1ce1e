use clap::Parser;

use crate::config::CONFIG;

/// Command-line options for a single run
#[derive(Parser, Debug, Clone, Default)]
#[command(
    author,
    version,
    about = "Find documentation files that request a generated summary",
    disable_help_flag = true
)]
pub struct Options {
    /// Directory to work in, absolute or relative to the current directory
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<String>,

    /// Print usage information
    #[arg(short, long)]
    pub help: bool,

    /// Documentation language (or alias) to look for
    #[arg(short, long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Patterns to exclude (comma-separated glob patterns)
    #[arg(short, long)]
    pub exclude: Option<String>,

    /// Suppress informational output
    #[arg(short, long)]
    pub silent: bool,
}

impl Options {
    /// Split `--exclude` on the configured separator
    pub fn exclude_patterns(&self) -> Vec<String> {
        match self.exclude {
            Some(ref patterns) => patterns
                .split(CONFIG.separator)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_flags() {
        let options = Options::try_parse_from(["makesum", "-d", "docs", "-h", "-s"]).unwrap();
        assert_eq!(options.dir.as_deref(), Some("docs"));
        assert!(options.help);
        assert!(options.silent);
        assert!(options.lang.is_none());
    }

    #[test]
    fn parses_long_flags() {
        let options = Options::try_parse_from([
            "makesum",
            "--dir",
            "/srv/docs",
            "--lang",
            "md",
            "--exclude",
            "drafts/*, vendor",
        ])
        .unwrap();
        assert_eq!(options.dir.as_deref(), Some("/srv/docs"));
        assert_eq!(options.lang.as_deref(), Some("md"));
        assert!(!options.help);
        assert_eq!(options.exclude_patterns(), vec!["drafts/*", "vendor"]);
    }

    #[test]
    fn no_flags_means_defaults() {
        let options = Options::try_parse_from(["makesum"]).unwrap();
        assert!(options.dir.is_none());
        assert!(!options.help);
        assert!(options.exclude_patterns().is_empty());
    }

    #[test]
    fn dir_requires_a_value() {
        assert!(Options::try_parse_from(["makesum", "--dir"]).is_err());
    }
}
