//! Syntax highlighting for exported snapshots using syntect.

use std::sync::LazyLock;

use ratatui::style::{Color as TermColor, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use syntect_tui::into_span;

/// Cached syntax set - expensive to load, so we cache it globally.
pub static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const THEME_NAME: &str = "base16-ocean.dark";

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb(c.r, c.g, c.b)
}

/// Syntax highlighter backed by one of syntect's bundled themes.
pub struct Highlighter {
    theme: Theme,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        let theme = THEME_SET
            .themes
            .get(THEME_NAME)
            .cloned()
            .unwrap_or_default();
        Self { theme }
    }

    pub fn background_color(&self) -> TermColor {
        self.theme
            .settings
            .background
            .map(term_color)
            .unwrap_or(TermColor::Reset)
    }

    pub fn gutter_color(&self) -> TermColor {
        self.theme
            .settings
            .gutter_foreground
            .map(term_color)
            .unwrap_or(TermColor::DarkGray)
    }

    /// Highlight text and return ratatui Lines. Unknown extensions render
    /// as plain text.
    pub fn highlight(&self, text: &str, extension: &str) -> Vec<Line<'static>> {
        let syntax = SYNTAX_SET
            .find_syntax_by_extension(extension)
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        LinesWithEndings::from(text)
            .map(|line| {
                let ranges = highlighter
                    .highlight_line(line, &SYNTAX_SET)
                    .unwrap_or_default();
                let spans: Vec<Span<'static>> = ranges
                    .into_iter()
                    .filter_map(|seg| into_span(seg).ok())
                    .map(|span| {
                        let content = span.content.trim_end_matches('\n').to_string();
                        // Drop the explicit background so spans inherit the widget's
                        let mut style = Style::new();
                        if let Some(fg) = span.style.fg {
                            style = style.fg(fg);
                        }
                        for modifier in [Modifier::BOLD, Modifier::ITALIC, Modifier::UNDERLINED] {
                            if span.style.add_modifier.contains(modifier) {
                                style = style.add_modifier(modifier);
                            }
                        }
                        Span::styled(content, style)
                    })
                    .filter(|span| !span.content.is_empty())
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}
