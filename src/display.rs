//! Display list assembly
//!
//! Turns collected facts and the quote into the ordered lines shown next to
//! the logo.

use crossterm::style::Color;

use crate::config::Theme;
use crate::info::{Field, SystemInfo};

/// One line of the fetch output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayLine {
    /// Icon followed by colored text
    Entry {
        icon: String,
        text: String,
        color: Color,
    },
    /// Blank separator line
    Divider,
    /// Text without an icon; may span several rows
    Text { text: String, color: Color },
}

impl DisplayLine {
    fn entry(theme: &Theme, field: Field, text: &str) -> Self {
        DisplayLine::Entry {
            icon: theme.icon(field).to_string(),
            text: text.to_string(),
            color: theme.color(field),
        }
    }
}

/// Builds the display list
///
/// Order: username, divider, the detail facts, divider, quote. Facts that
/// are absent produce no line at all. Without a quote the trailing divider is
/// dropped too.
pub fn build_display(info: &SystemInfo, quote: Option<&str>, theme: &Theme) -> Vec<DisplayLine> {
    let mut lines = Vec::new();

    if let Some(user) = info.get(Field::User) {
        lines.push(DisplayLine::entry(theme, Field::User, user));
        lines.push(DisplayLine::Divider);
    }

    lines.extend(
        Field::DETAILS
            .iter()
            .filter_map(|&field| info.get(field).map(|value| DisplayLine::entry(theme, field, value))),
    );

    if let Some(quote) = quote.filter(|q| !q.trim().is_empty()) {
        if !lines.is_empty() {
            lines.push(DisplayLine::Divider);
        }
        lines.push(DisplayLine::Text {
            text: quote.to_string(),
            color: theme.quote_color.0,
        });
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_info() -> SystemInfo {
        SystemInfo {
            username: Some("alice".to_string()),
            os: Some("Linux".to_string()),
            arch: Some("x86_64".to_string()),
            uptime: Some("3 hours".to_string()),
            shell: Some("zsh".to_string()),
            terminal: Some("kitty".to_string()),
            editor: Some("nvim".to_string()),
            browser: Some("firefox".to_string()),
            desktop: Some("Hyprland".to_string()),
        }
    }

    fn texts(lines: &[DisplayLine]) -> Vec<String> {
        lines
            .iter()
            .map(|line| match line {
                DisplayLine::Entry { text, .. } => text.clone(),
                DisplayLine::Divider => "--".to_string(),
                DisplayLine::Text { text, .. } => format!("> {}", text),
            })
            .collect()
    }

    #[test]
    fn test_full_display_order() {
        let lines = build_display(&full_info(), Some("Q\n~ A"), &Theme::default());

        assert_eq!(
            texts(&lines),
            vec![
                "alice", "--", "Linux", "x86_64", "3 hours", "zsh", "kitty", "nvim", "firefox",
                "Hyprland", "--", "> Q\n~ A",
            ]
        );
    }

    #[test]
    fn test_absent_facts_are_omitted() {
        let info = SystemInfo {
            username: Some("alice".to_string()),
            shell: Some("bash".to_string()),
            ..Default::default()
        };

        let lines = build_display(&info, None, &Theme::default());

        assert_eq!(texts(&lines), vec!["alice", "--", "bash"]);
    }

    #[test]
    fn test_no_quote_has_no_trailing_divider() {
        let lines = build_display(&full_info(), None, &Theme::default());
        assert_ne!(lines.last(), Some(&DisplayLine::Divider));
    }

    #[test]
    fn test_quote_line_has_no_icon() {
        let lines = build_display(&SystemInfo::default(), Some("Hi\n~ Bob"), &Theme::default());

        assert_eq!(
            lines,
            vec![DisplayLine::Text {
                text: "Hi\n~ Bob".to_string(),
                color: Theme::default().quote_color.0,
            }]
        );
    }

    #[test]
    fn test_entry_uses_theme_icon_and_color() {
        let theme = Theme::default();
        let lines = build_display(&full_info(), None, &theme);

        match &lines[0] {
            DisplayLine::Entry { icon, color, .. } => {
                assert_eq!(icon, theme.icon(Field::User));
                assert_eq!(*color, theme.color(Field::User));
            }
            other => panic!("expected entry, got {:?}", other),
        }
    }
}
