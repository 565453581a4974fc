//! Command line flags for the threshold screener.

use super::{parse_value, ConfigError};
use crate::signals::screener::DEFAULT_CHANGE_THRESHOLD;

pub const DEFAULT_PER_PAGE: u32 = 10;
/// Largest page CoinGecko serves for `/coins/markets`.
pub const MAX_PER_PAGE: u32 = 250;

pub const USAGE: &str = "\
Simple crypto screener using the CoinGecko API

Usage: screener [--per-page <N>] [--threshold <PCT>]

Options:
  --per-page <N>      Number of coins to fetch, 1 to 250 [default: 10]
  --threshold <PCT>   24h percentage change threshold [default: 5.0]
  -h, --help          Print this help";

#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Run(ScreenerArgs),
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenerArgs {
    pub per_page: u32,
    pub threshold: f64,
}

impl Default for ScreenerArgs {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            threshold: DEFAULT_CHANGE_THRESHOLD,
        }
    }
}

impl ScreenerArgs {
    /// Parse flags, excluding the program name.
    ///
    /// Accepts both `--flag value` and `--flag=value`.
    pub fn parse_from<I, S>(args: I) -> Result<CliCommand, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter().map(Into::<String>::into);

        while let Some(arg) = args.next() {
            if arg == "-h" || arg == "--help" {
                return Ok(CliCommand::Help);
            }

            let (flag, inline_value) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg.clone(), None),
            };

            match flag.as_str() {
                "--per-page" | "--threshold" => {
                    let value = match inline_value {
                        Some(value) => value,
                        None => args
                            .next()
                            .ok_or_else(|| ConfigError::MissingValue(flag.clone()))?,
                    };
                    if flag == "--per-page" {
                        parsed.per_page = parse_value(&flag, &value)?;
                        if !is_valid_per_page(parsed.per_page) {
                            return Err(ConfigError::InvalidValue {
                                key: flag,
                                value,
                                reason: format!("must be between 1 and {}", MAX_PER_PAGE),
                            });
                        }
                    } else {
                        parsed.threshold = parse_value(&flag, &value)?;
                    }
                }
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }

        Ok(CliCommand::Run(parsed))
    }
}

pub fn is_valid_per_page(per_page: u32) -> bool {
    (1..=MAX_PER_PAGE).contains(&per_page)
}
