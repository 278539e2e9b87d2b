//! quotefetch - system info next to an ANSI logo, with a quote of the day
//!
//! Collects a few local facts, resolves today's quote from the cache or the
//! network, and prints everything once.

use std::io::{self, Write};
use std::process;

use chrono::{DateTime, Local};
use clap::Parser;
use tracing::warn;

use quotefetch::cache::QuoteCache;
use quotefetch::cli::{Cli, Overrides};
use quotefetch::config::{Config, ConfigError, QuoteConfig};
use quotefetch::display::build_display;
use quotefetch::info::SystemInfo;
use quotefetch::logging;
use quotefetch::quote::{resolve_daily_quote, QuoteClient, QuoteContext};
use quotefetch::render::{render, Logo};

/// Loads the config named on the command line, or the default one if present
fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    match &cli.config {
        Some(path) => Config::load(path),
        None => match Config::default_path() {
            Some(path) => Config::load_or_default(&path),
            None => Ok(Config::default()),
        },
    }
}

/// Resolves today's quote; every failure ends up as `None`
async fn todays_quote(config: &QuoteConfig, now: DateTime<Local>) -> Option<String> {
    if !config.enabled {
        return None;
    }

    let cache = match &config.cache_file {
        Some(path) => QuoteCache::with_path(path.clone()),
        None => match QuoteCache::new() {
            Some(cache) => cache,
            None => {
                warn!("no cache directory available, skipping quote");
                return None;
            }
        },
    };

    let client = match QuoteClient::new(config.endpoint.clone(), config.timeout()) {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "failed to build HTTP client, skipping quote");
            return None;
        }
    };

    let ctx = QuoteContext {
        now,
        cache: &cache,
        source: &client,
    };

    match resolve_daily_quote(&ctx).await {
        Ok(resolution) => resolution.into_text(),
        Err(e) => {
            warn!(error = %e, "quote resolution failed");
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let overrides = match Overrides::from_cli(&cli) {
        Ok(overrides) => overrides,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    let mut config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };
    config.apply(&overrides);

    let logo = Logo::load(config.logo.as_deref());

    let (info, quote) = tokio::join!(
        SystemInfo::gather(),
        todays_quote(&config.quote, Local::now())
    );

    let lines = build_display(&info, quote.as_deref(), &config.theme);

    let mut stdout = io::stdout().lock();
    render(&mut stdout, &logo, &lines)?;
    stdout.flush()?;

    Ok(())
}
