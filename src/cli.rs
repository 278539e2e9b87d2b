//! Command-line interface parsing for quotefetch
//!
//! This module handles parsing of CLI arguments using clap. Flags given here
//! override the matching settings from the config file.

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use thiserror::Error;

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// The logo given with --logo does not exist
    #[error("Logo file not found: '{}'", .0.display())]
    LogoNotFound(PathBuf),
}

/// quotefetch - system info with a logo and a quote of the day
#[derive(Parser, Debug)]
#[command(name = "quotefetch")]
#[command(about = "System info next to an ANSI logo, with a daily quote")]
#[command(version)]
pub struct Cli {
    /// Use this ANSI-art logo file instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub logo: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Do not show (or fetch) the quote of the day
    #[arg(long)]
    pub no_quote: bool,

    /// Log more to stderr (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Settings derived from CLI arguments that override the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Logo path from --logo
    pub logo: Option<PathBuf>,
    /// Whether --no-quote was given
    pub no_quote: bool,
}

impl Overrides {
    /// Creates Overrides from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(Overrides)` with the requested overrides
    /// * `Err(CliError::LogoNotFound)` if --logo names a missing file
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if let Some(logo) = &cli.logo {
            if !logo.is_file() {
                return Err(CliError::LogoNotFound(logo.clone()));
            }
        }

        Ok(Overrides {
            logo: cli.logo.clone(),
            no_quote: cli.no_quote,
        })
    }
}
