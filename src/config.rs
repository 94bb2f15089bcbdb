use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::system::collector::StatSelection;
use crate::ui::DisplayMode;

/// Largest sample count accepted. Refresh mode redraws this many rows per tick.
pub const MAX_SAMPLES: usize = 10_000;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sampling: SamplingConfig,
    pub display: DisplayConfig,
    pub stats: StatsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub samples: usize,
    pub tdelay: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        SamplingConfig {
            samples: 10,
            tdelay: 1,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub sequential: bool,
    pub graphics: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub system: bool,
    pub user: bool,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("statline").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring invalid config file");
            Config::default()
        }),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "config file not readable, using defaults");
            Config::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub samples: usize,
    pub delay_secs: u64,
    pub mode: DisplayMode,
    pub graphics: bool,
    pub stats: StatSelection,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Settings, ConfigError> {
        let (positional_samples, positional_delay) =
            resolve_positionals(&cli.positional, cli.samples.is_some(), cli.tdelay.is_some())?;

        let samples = cli
            .samples
            .or(positional_samples)
            .unwrap_or(config.sampling.samples);
        if samples > MAX_SAMPLES {
            return Err(ConfigError(samples.to_string()));
        }
        let delay_secs = cli
            .tdelay
            .or(positional_delay)
            .unwrap_or(config.sampling.tdelay);

        let mut system = cli.system || config.stats.system;
        let mut user = cli.user || config.stats.user;
        if !system && !user {
            system = true;
            user = true;
        }

        let mode = if cli.sequential || config.display.sequential {
            DisplayMode::Sequential
        } else {
            DisplayMode::Refresh
        };

        Ok(Settings {
            samples,
            delay_secs,
            mode,
            graphics: cli.graphics || config.display.graphics,
            stats: StatSelection { system, user },
        })
    }
}

fn resolve_positionals(
    tokens: &[String],
    samples_flagged: bool,
    delay_flagged: bool,
) -> Result<(Option<usize>, Option<u64>), ConfigError> {
    match tokens {
        [] => Ok((None, None)),
        [samples, delay] if !samples_flagged && !delay_flagged => {
            Ok((Some(parse_integer(samples)?), Some(parse_integer(delay)?)))
        }
        [samples] if !samples_flagged => Ok((Some(parse_integer(samples)?), None)),
        [.., unexpected] => Err(ConfigError(unexpected.clone())),
    }
}

fn parse_integer<T: std::str::FromStr>(token: &str) -> Result<T, ConfigError> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError(token.to_string()));
    }
    token.parse().map_err(|_| ConfigError(token.to_string()))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn resolve(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(std::iter::once("statline").chain(args.iter().copied()))
            .map_err(|e| ConfigError(e.to_string()))?;
        Settings::resolve(&cli, &Config::default())
    }

    #[test]
    fn defaults_enable_everything_in_refresh_mode() {
        let settings = resolve(&[]).unwrap();
        assert_eq!(settings.samples, 10);
        assert_eq!(settings.delay_secs, 1);
        assert_eq!(settings.mode, DisplayMode::Refresh);
        assert!(!settings.graphics);
        assert_eq!(
            settings.stats,
            StatSelection {
                system: true,
                user: true
            }
        );
    }

    #[test]
    fn two_positionals_set_samples_and_delay() {
        let settings = resolve(&["5", "2"]).unwrap();
        assert_eq!(settings.samples, 5);
        assert_eq!(settings.delay_secs, 2);
    }

    #[test]
    fn flags_set_samples_and_delay() {
        let settings = resolve(&["--samples=3", "--tdelay=1"]).unwrap();
        assert_eq!(settings.samples, 3);
        assert_eq!(settings.delay_secs, 1);
    }

    #[test]
    fn single_positional_sets_samples_only() {
        let settings = resolve(&["7", "--tdelay=3"]).unwrap();
        assert_eq!(settings.samples, 7);
        assert_eq!(settings.delay_secs, 3);
    }

    #[test]
    fn trailing_non_numeric_token_fails() {
        assert!(resolve(&["--samples=3", "foo"]).is_err());
        assert!(resolve(&["5", "x"]).is_err());
    }

    #[test]
    fn positional_after_samples_flag_fails() {
        assert!(resolve(&["--samples=3", "7"]).is_err());
    }

    #[test]
    fn three_positionals_fail() {
        assert!(resolve(&["1", "2", "3"]).is_err());
    }

    #[test]
    fn oversized_sample_count_fails() {
        assert!(resolve(&["--samples=1000000000000000000"]).is_err());
        assert!(resolve(&["10001", "0"]).is_err());
        assert_eq!(resolve(&["--samples=10000"]).unwrap().samples, MAX_SAMPLES);
    }

    #[test]
    fn oversized_config_sample_count_fails() {
        let config: Config = toml::from_str("[sampling]\nsamples = 50000\n").unwrap();
        let cli = Cli::try_parse_from(["statline"]).unwrap();
        assert!(Settings::resolve(&cli, &config).is_err());
    }

    #[test]
    fn unknown_flag_fails() {
        assert!(resolve(&["--verbose"]).is_err());
    }

    #[test]
    fn signed_integers_are_not_positionals() {
        assert!(parse_integer::<usize>("+5").is_err());
        assert!(parse_integer::<usize>("").is_err());
        assert_eq!(parse_integer::<usize>("12").unwrap(), 12);
    }

    #[test]
    fn selecting_one_category_keeps_the_other_off() {
        let settings = resolve(&["--user", "--sequential", "--graphics"]).unwrap();
        assert_eq!(
            settings.stats,
            StatSelection {
                system: false,
                user: true
            }
        );
        assert_eq!(settings.mode, DisplayMode::Sequential);
        assert!(settings.graphics);
    }

    #[test]
    fn config_file_supplies_defaults_that_flags_override() {
        let config: Config = toml::from_str(
            r#"
[sampling]
samples = 4
tdelay = 9

[display]
graphics = true

[stats]
system = true
"#,
        )
        .unwrap();
        let cli = Cli::try_parse_from(["statline", "--tdelay=2"]).unwrap();
        let settings = Settings::resolve(&cli, &config).unwrap();
        assert_eq!(settings.samples, 4);
        assert_eq!(settings.delay_secs, 2);
        assert!(settings.graphics);
        assert!(settings.stats.system);
        assert!(!settings.stats.user);
    }

    #[test]
    fn positionals_override_config_file() {
        let config: Config = toml::from_str("[sampling]\nsamples = 4\n").unwrap();
        let cli = Cli::try_parse_from(["statline", "6", "0"]).unwrap();
        let settings = Settings::resolve(&cli, &config).unwrap();
        assert_eq!(settings.samples, 6);
        assert_eq!(settings.delay_secs, 0);
    }

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.sampling.samples, 10);
        assert_eq!(config.sampling.tdelay, 1);
        assert!(!config.display.sequential);
        assert!(!config.stats.user);
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.sampling.samples, 10);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let temp = std::env::temp_dir().join("statline_test_invalid.toml");
        std::fs::write(&temp, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&temp);
        assert_eq!(config.sampling.samples, 10);
        let _ = std::fs::remove_file(&temp);
    }
}
