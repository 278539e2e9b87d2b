//! Cache module for the quote of the day
//!
//! This module persists the last successfully fetched quote to a single text
//! file. Freshness is derived from the file's modification time, so the entry
//! carries no metadata of its own.

mod manager;

pub use manager::{is_same_day, CachedQuote, QuoteCache, CACHE_FILE_NAME};
