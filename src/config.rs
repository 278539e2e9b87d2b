//! User configuration loaded from `config.yaml`
//!
//! Every field has a default, so a missing file or a partial file both work.
//! Command-line overrides are applied on top after loading.

use crossterm::style::Color;
use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cli::Overrides;
use crate::info::Field;
use crate::quote::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Shortest request timeout honoured; zero would fail every fetch instantly
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file is not valid YAML for `Config`
    #[error("Failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A color value is not a known name, `#rrggbb`, or 0-255
    #[error("Invalid color: '{0}'. Use a name like 'cyan', '#rrggbb', or an ANSI value 0-255")]
    InvalidColor(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ANSI-art logo file; the built-in logo is used when unset
    pub logo: Option<PathBuf>,
    /// Quote of the day settings
    pub quote: QuoteConfig,
    /// Icons and colors for each line
    pub theme: Theme,
}

/// Quote of the day settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// Whether to show the quote at all
    pub enabled: bool,
    /// Quote-of-the-day endpoint
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Cache file override; defaults to `motd.txt` in the user cache directory
    pub cache_file: Option<PathBuf>,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            cache_file: None,
        }
    }
}

impl QuoteConfig {
    /// Request timeout, never shorter than [`MIN_TIMEOUT_SECS`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(MIN_TIMEOUT_SECS))
    }
}

/// A color as written in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct ThemeColor(pub Color);

impl TryFrom<String> for ThemeColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_color(&value)
            .map(ThemeColor)
            .ok_or(ConfigError::InvalidColor(value))
    }
}

/// Parses a color name, a `#rrggbb` hex triplet, or an ANSI palette index
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim().to_lowercase();

    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some(Color::Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        });
    }

    if let Ok(index) = value.parse::<u8>() {
        return Some(Color::AnsiValue(index));
    }

    let color = match value.replace('-', "_").as_str() {
        "reset" | "default" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" | "purple" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "dark_grey" | "dark_gray" => Color::DarkGrey,
        "dark_red" => Color::DarkRed,
        "dark_green" => Color::DarkGreen,
        "dark_yellow" => Color::DarkYellow,
        "dark_blue" => Color::DarkBlue,
        "dark_magenta" => Color::DarkMagenta,
        "dark_cyan" => Color::DarkCyan,
        _ => return None,
    };
    Some(color)
}

/// Replaces a leading `~` component with `home`
///
/// `~user` forms are left alone, as is everything when `home` is unknown.
pub fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// Per-field icon and color settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub icons: Icons,
    pub colors: Colors,
    /// Color of the quote text
    pub quote_color: ThemeColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            icons: Icons::default(),
            colors: Colors::default(),
            quote_color: ThemeColor(Color::Grey),
        }
    }
}

impl Theme {
    pub fn icon(&self, field: Field) -> &str {
        let icons = &self.icons;
        match field {
            Field::User => &icons.user,
            Field::Os => &icons.os,
            Field::Arch => &icons.arch,
            Field::Uptime => &icons.uptime,
            Field::Shell => &icons.shell,
            Field::Terminal => &icons.terminal,
            Field::Editor => &icons.editor,
            Field::Browser => &icons.browser,
            Field::Desktop => &icons.desktop,
        }
    }

    pub fn color(&self, field: Field) -> Color {
        let colors = &self.colors;
        let color = match field {
            Field::User => colors.user,
            Field::Os => colors.os,
            Field::Arch => colors.arch,
            Field::Uptime => colors.uptime,
            Field::Shell => colors.shell,
            Field::Terminal => colors.terminal,
            Field::Editor => colors.editor,
            Field::Browser => colors.browser,
            Field::Desktop => colors.desktop,
        };
        color.0
    }
}

/// Icons shown before each fact (Nerd Font glyphs by default)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Icons {
    pub user: String,
    pub os: String,
    pub arch: String,
    pub uptime: String,
    pub shell: String,
    pub terminal: String,
    pub editor: String,
    pub browser: String,
    pub desktop: String,
}

impl Default for Icons {
    fn default() -> Self {
        Self {
            user: "\u{F007}".to_string(),     // user
            os: "\u{F17C}".to_string(),       // linux
            arch: "\u{F2DB}".to_string(),     // microchip
            uptime: "\u{F017}".to_string(),   // clock
            shell: "\u{F489}".to_string(),    // terminal
            terminal: "\u{E795}".to_string(), // console
            editor: "\u{F044}".to_string(),   // pencil
            browser: "\u{F269}".to_string(),  // firefox
            desktop: "\u{F108}".to_string(),  // desktop
        }
    }
}

/// Colors for each fact
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub user: ThemeColor,
    pub os: ThemeColor,
    pub arch: ThemeColor,
    pub uptime: ThemeColor,
    pub shell: ThemeColor,
    pub terminal: ThemeColor,
    pub editor: ThemeColor,
    pub browser: ThemeColor,
    pub desktop: ThemeColor,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            user: ThemeColor(Color::Cyan),
            os: ThemeColor(Color::Blue),
            arch: ThemeColor(Color::Magenta),
            uptime: ThemeColor(Color::Green),
            shell: ThemeColor(Color::Yellow),
            terminal: ThemeColor(Color::Red),
            editor: ThemeColor(Color::Cyan),
            browser: ThemeColor(Color::Blue),
            desktop: ThemeColor(Color::Magenta),
        }
    }
}

impl Config {
    /// Default config location (`~/.config/quotefetch/config.yaml` on Linux)
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "quotefetch")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Parses configuration from YAML text
    ///
    /// A leading `~` in `logo` and `quote.cache_file` is expanded to the
    /// home directory.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes to unit, not a mapping
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Config = serde_yaml::from_str(text)?;

        let base_dirs = BaseDirs::new();
        let home = base_dirs.as_ref().map(BaseDirs::home_dir);
        config.logo = config.logo.map(|path| expand_home(&path, home));
        config.quote.cache_file = config.quote.cache_file.map(|path| expand_home(&path, home));

        if config.quote.timeout_secs < MIN_TIMEOUT_SECS {
            warn!(
                timeout_secs = config.quote.timeout_secs,
                "quote timeout too short, using {}s", MIN_TIMEOUT_SECS
            );
            config.quote.timeout_secs = MIN_TIMEOUT_SECS;
        }

        Ok(config)
    }

    /// Loads configuration from `path`, which must exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads configuration from `path`, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides on top of the loaded configuration
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(logo) = &overrides.logo {
            self.logo = Some(logo.clone());
        }
        if overrides.no_quote {
            self.quote.enabled = false;
        }
    }
}
