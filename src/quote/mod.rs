//! Daily quote resolution
//!
//! Decides which quote to show today: the cached entry when it was written
//! today, otherwise a fresh one from the quote source. Network trouble never
//! escapes this module; it degrades to the previous entry or to no quote.

pub mod client;

pub use client::{
    parse_quote_body, FetchError, QuoteClient, QuoteSource, RemoteQuote, DEFAULT_ENDPOINT,
    DEFAULT_TIMEOUT,
};

use chrono::{DateTime, Local};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::QuoteCache;

/// Errors that escape quote resolution
#[derive(Debug, Error)]
pub enum QuoteError {
    /// A fresh quote was fetched but could not be stored
    #[error("Failed to write quote cache {}: {source}", .path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Everything resolution depends on, passed in explicitly
pub struct QuoteContext<'a, S> {
    /// Current local time, used for the freshness check
    pub now: DateTime<Local>,
    /// The cache entry to read and refresh
    pub cache: &'a QuoteCache,
    /// Where fresh quotes come from
    pub source: &'a S,
}

/// Which path produced today's quote
#[derive(Debug)]
pub enum QuoteResolution {
    /// Cache entry was written today; no fetch was made
    Fresh(String),
    /// Fetched, stored and returned a new quote
    Refreshed(String),
    /// Fetch failed; returning the previous entry unchanged
    FallbackStale { text: String, reason: FetchError },
    /// Fetch failed and there was nothing cached
    Absent { reason: FetchError },
}

impl QuoteResolution {
    /// The text to display, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            QuoteResolution::Fresh(text)
            | QuoteResolution::Refreshed(text)
            | QuoteResolution::FallbackStale { text, .. } => Some(text.as_str()),
            QuoteResolution::Absent { .. } => None,
        }
    }

    /// Consumes the resolution, returning the text to display
    pub fn into_text(self) -> Option<String> {
        match self {
            QuoteResolution::Fresh(text)
            | QuoteResolution::Refreshed(text)
            | QuoteResolution::FallbackStale { text, .. } => Some(text),
            QuoteResolution::Absent { .. } => None,
        }
    }
}

/// Resolves the quote to display today
///
/// # Behavior
/// - Returns the cached entry as-is if it was modified on today's calendar day
/// - Otherwise makes exactly one fetch attempt
/// - On success, overwrites the cache entry and returns the new text
/// - On any fetch failure, returns the previous entry if there was one
///
/// # Returns
/// * `Ok(QuoteResolution)` - for every fetch outcome
/// * `Err(QuoteError::CacheWrite)` - only when a fetched quote cannot be stored
pub async fn resolve_daily_quote<S: QuoteSource>(
    ctx: &QuoteContext<'_, S>,
) -> Result<QuoteResolution, QuoteError> {
    let previous = match ctx.cache.read() {
        Some(entry) if entry.is_fresh(&ctx.now) => {
            debug!(modified = %entry.modified, "using today's cached quote");
            return Ok(QuoteResolution::Fresh(entry.text));
        }
        other => other,
    };

    match ctx.source.fetch().await {
        Ok(remote) => {
            let text = remote.to_cache_text();
            ctx.cache
                .write(&text)
                .map_err(|source| QuoteError::CacheWrite {
                    path: ctx.cache.path().to_path_buf(),
                    source,
                })?;
            info!(author = %remote.author, "refreshed quote of the day");
            Ok(QuoteResolution::Refreshed(text))
        }
        Err(reason) => match previous {
            Some(entry) => {
                warn!(error = %reason, "quote fetch failed, using previous quote");
                Ok(QuoteResolution::FallbackStale {
                    text: entry.text,
                    reason,
                })
            }
            None => {
                warn!(error = %reason, "quote fetch failed and nothing is cached");
                Ok(QuoteResolution::Absent { reason })
            }
        },
    }
}
