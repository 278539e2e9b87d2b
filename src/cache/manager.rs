//! Quote cache file backed by the filesystem
//!
//! Provides a `QuoteCache` that stores the two-line quote text in a plain file
//! and reports the file's last-modified time back as a local timestamp.

use chrono::{DateTime, Local};
use directories::BaseDirs;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// File name of the cache entry inside the user cache directory
pub const CACHE_FILE_NAME: &str = "motd.txt";

/// Result of reading the cache entry, including its modification time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedQuote {
    /// The cached quote text
    pub text: String,
    /// When the entry was last written
    pub modified: DateTime<Local>,
}

impl CachedQuote {
    /// Whether the entry was written on the same local calendar day as `now`
    pub fn is_fresh(&self, now: &DateTime<Local>) -> bool {
        is_same_day(&self.modified, now)
    }
}

/// Compares two local timestamps by calendar day only.
///
/// 23:59:59 on one day and 00:00:00 on the next are different days even though
/// they are one second apart.
pub fn is_same_day(a: &DateTime<Local>, b: &DateTime<Local>) -> bool {
    a.date_naive() == b.date_naive()
}

/// Reads and overwrites the single quote cache file
///
/// The file lives at `~/.cache/motd.txt` on Linux, or the equivalent per-user
/// cache directory on other platforms.
#[derive(Debug, Clone)]
pub struct QuoteCache {
    /// Location of the cache entry
    path: PathBuf,
}

impl QuoteCache {
    /// Creates a QuoteCache in the user's cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let base_dirs = BaseDirs::new()?;
        Some(Self {
            path: base_dirs.cache_dir().join(CACHE_FILE_NAME),
        })
    }

    /// Creates a QuoteCache backed by an explicit file path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path of the cache entry
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the cache entry
    ///
    /// Returns `None` when the entry does not exist. An entry that exists but
    /// cannot be read (permissions, invalid UTF-8) is logged and also reported
    /// as `None`, so the caller simply refreshes it.
    pub fn read(&self) -> Option<CachedQuote> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no quote cache entry");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to stat quote cache");
                return None;
            }
        };

        let modified = match metadata.modified() {
            Ok(time) => DateTime::<Local>::from(time),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "quote cache has no modification time");
                return None;
            }
        };

        match fs::read_to_string(&self.path) {
            Ok(text) => Some(CachedQuote { text, modified }),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read quote cache");
                None
            }
        }
    }

    /// Overwrites the cache entry with `text`
    ///
    /// The text is written to a temporary file in the same directory and then
    /// renamed over the entry, so readers never observe a partial write. Any
    /// missing parent directories are created.
    pub fn write(&self, text: &str) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(text.as_bytes())?;
        temp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), "wrote quote cache");
        Ok(())
    }
}
