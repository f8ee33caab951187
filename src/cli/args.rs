//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "aicost")]
#[command(about = "Estimate monthly AI usage cost for product interactions", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Settings snapshot file (default: ~/.config/aicost/settings.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) settings: Option<PathBuf>,

    /// Directory with models.json and interactions.json (default: built-in catalog)
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) catalog: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Output as CSV
    #[arg(long, global = true, conflicts_with = "json")]
    pub(crate) csv: bool,

    /// Compact output (abbreviated token counts)
    #[arg(short = 'c', long, global = true)]
    pub(crate) compact: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Locale for number formatting (e.g., "en", "de", "fr")
    #[arg(long, global = true, value_name = "LOCALE")]
    pub(crate) locale: Option<String>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.compact && config.compact {
            self.compact = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        if self.locale.is_none() {
            self.locale = config.locale.clone();
        }
        if self.catalog.is_none() {
            self.catalog = config.catalog_dir.clone();
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("aicost").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn config_fills_unset_options() {
        let config = Config {
            compact: true,
            color: Some(ConfigColorMode::Never),
            locale: Some("de".to_string()),
            catalog_dir: Some(PathBuf::from("/etc/aicost")),
            ..Default::default()
        };
        let cli = parse(&[]).with_config(&config);
        assert!(cli.compact);
        assert_eq!(cli.color, ColorMode::Never);
        assert_eq!(cli.locale.as_deref(), Some("de"));
        assert_eq!(cli.catalog, Some(PathBuf::from("/etc/aicost")));
    }

    #[test]
    fn cli_values_win_over_config() {
        let config = Config {
            color: Some(ConfigColorMode::Never),
            locale: Some("de".to_string()),
            ..Default::default()
        };
        let cli = parse(&["--color", "always", "--locale", "fr"]).with_config(&config);
        assert_eq!(cli.color, ColorMode::Always);
        assert_eq!(cli.locale.as_deref(), Some("fr"));
    }

    #[test]
    fn no_color_overrides_always() {
        let cli = parse(&["--color", "always", "--no-color"]);
        assert!(!cli.use_color());
    }

    #[test]
    fn json_and_csv_conflict() {
        assert!(Cli::try_parse_from(["aicost", "--json", "--csv"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["summary", "--json"]);
        assert!(cli.json);
        assert!(cli.command.is_some());
    }
}
