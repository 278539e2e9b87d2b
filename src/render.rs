//! Terminal output
//!
//! Prints the logo on the left and the display lines on the right. Logo
//! lines are written untouched so any ANSI colors in the art survive; the
//! column is aligned by the logo's visible width.

use crossterm::queue;
use crossterm::style::{Attribute, Print, PrintStyledContent, ResetColor, SetAttribute, Stylize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::warn;
use unicode_width::UnicodeWidthStr;

use crate::display::DisplayLine;

/// Spaces between the logo and the text column
const GAP: usize = 3;

const BUILTIN_LOGO: &str = "\x1b[36m   ___  \x1b[0m
\x1b[36m  (o o) \x1b[0m
\x1b[36m  /   \\ \x1b[0m
\x1b[36m /|   |\\\x1b[0m
\x1b[36m  |___| \x1b[0m
\x1b[36m   ^ ^  \x1b[0m";

/// ANSI-art logo with its visible width precomputed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    lines: Vec<String>,
    width: usize,
}

impl Logo {
    /// Builds a logo from raw text
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        let width = lines.iter().map(|l| visible_width(l)).max().unwrap_or(0);
        Self { lines, width }
    }

    /// The logo shipped with the binary
    pub fn builtin() -> Self {
        Self::from_text(BUILTIN_LOGO)
    }

    /// Loads the logo at `path`, falling back to the built-in logo
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };
        match fs::read_to_string(path) {
            Ok(text) => Self::from_text(&text),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read logo, using built-in");
                Self::builtin()
            }
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

/// Removes ANSI escape sequences (CSI and OSC) from `text`
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        match chars.next() {
            // CSI: parameters until a final byte in '@'..='~'
            Some('[') => {
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            // OSC: until BEL or ESC '\'
            Some(']') => {
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    out
}

/// Number of terminal columns `text` occupies once escapes are removed
///
/// East Asian wide glyphs count as two columns, combining marks as zero.
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).width()
}

/// A single output row on the right-hand side
enum Row<'a> {
    Entry {
        icon: &'a str,
        text: &'a str,
        color: crossterm::style::Color,
    },
    Text {
        text: &'a str,
        color: crossterm::style::Color,
    },
    Blank,
}

fn rows(lines: &[DisplayLine]) -> Vec<Row<'_>> {
    let mut rows = Vec::new();
    for line in lines {
        match line {
            DisplayLine::Entry { icon, text, color } => rows.push(Row::Entry {
                icon,
                text,
                color: *color,
            }),
            DisplayLine::Divider => rows.push(Row::Blank),
            DisplayLine::Text { text, color } => {
                rows.extend(text.lines().map(|text| Row::Text {
                    text,
                    color: *color,
                }));
            }
        }
    }
    rows
}

/// Writes the logo and display lines side by side
pub fn render<W: Write>(out: &mut W, logo: &Logo, lines: &[DisplayLine]) -> io::Result<()> {
    let rows = rows(lines);
    let height = rows.len().max(logo.height());

    for i in 0..height {
        let logo_line = logo.lines.get(i).map(String::as_str).unwrap_or("");
        let padding = logo.width - visible_width(logo_line) + GAP;

        queue!(
            out,
            Print(logo_line),
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;

        match rows.get(i) {
            Some(Row::Entry { icon, text, color }) => {
                queue!(
                    out,
                    Print(" ".repeat(padding)),
                    PrintStyledContent(format!("{}  ", icon).with(*color).bold()),
                    PrintStyledContent((*text).with(*color))
                )?;
            }
            Some(Row::Text { text, color }) => {
                queue!(
                    out,
                    Print(" ".repeat(padding)),
                    PrintStyledContent((*text).with(*color).italic())
                )?;
            }
            Some(Row::Blank) | None => {}
        }

        queue!(out, Print("\n"))?;
    }

    out.flush()
}
