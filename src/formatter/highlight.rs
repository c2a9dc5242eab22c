//! Syntax highlighting for fenced code.
//!
//! Uses syntect with the bundled Sublime Text syntax definitions. Every
//! token is emitted as a 24-bit foreground color followed by a reset, the
//! same shape terminal highlighters usually produce.

use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::FormatError;
use crate::ansi::RESET;

/// Themes tried, in order, when the style sheet names none.
const PREFERRED_THEMES: &[&str] = &[
    "base16-ocean.dark",
    "base16-eighties.dark",
    "base16-mocha.dark",
    "Solarized (dark)",
];

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

/// Resolve the highlighting theme.
///
/// An explicitly named theme must exist; without a name the first available
/// preferred theme is used.
pub(super) fn resolve_theme(name: Option<&str>) -> Result<&'static Theme, FormatError> {
    let themes = &theme_set().themes;
    if let Some(name) = name {
        return themes
            .get(name)
            .ok_or_else(|| FormatError::UnknownTheme(name.to_string()));
    }
    PREFERRED_THEMES
        .iter()
        .find_map(|name| themes.get(*name))
        .or_else(|| themes.values().next())
        .ok_or_else(|| FormatError::UnknownTheme(PREFERRED_THEMES[0].to_string()))
}

/// Highlight `code` line by line.
///
/// Returns `Ok(None)` when no syntax matches `language`; the caller renders
/// the block plain.
pub(super) fn highlight_code(
    language: Option<&str>,
    code: &str,
    theme: &Theme,
) -> Result<Option<Vec<String>>, FormatError> {
    let syntax_set = syntax_set();
    let syntax = language
        .and_then(|lang| syntax_set.find_syntax_by_token(lang))
        .or_else(|| language.and_then(|lang| syntax_set.find_syntax_by_name(lang)));
    let Some(syntax) = syntax else {
        return Ok(None);
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();
    for line in LinesWithEndings::from(code) {
        let ranges = highlighter.highlight_line(line, syntax_set)?;
        let mut out = String::new();
        for (style, text) in ranges {
            let text = text.trim_end_matches(['\n', '\r']);
            if text.is_empty() {
                continue;
            }
            let fg = style.foreground;
            out.push_str(&format!("\x1b[38;2;{};{};{}m{text}{RESET}", fg.r, fg.g, fg.b));
        }
        lines.push(out);
    }
    Ok(Some(lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_rust_produces_colored_tokens() {
        let theme = resolve_theme(None).unwrap();
        let lines = highlight_code(Some("rust"), "fn main() {\n    let x = 1;\n}\n", theme)
            .unwrap()
            .unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("\x1b[38;2;"));
        assert!(lines[0].contains(RESET));
    }

    #[test]
    fn test_highlight_unknown_language_is_none() {
        let theme = resolve_theme(None).unwrap();
        assert!(highlight_code(Some("nope"), "x", theme).unwrap().is_none());
        assert!(highlight_code(None, "x", theme).unwrap().is_none());
    }

    #[test]
    fn test_highlight_keeps_text() {
        let theme = resolve_theme(None).unwrap();
        let lines = highlight_code(Some("go"), "package main", theme)
            .unwrap()
            .unwrap();
        assert_eq!(crate::ansi::strip(&lines[0]), "package main");
    }

    #[test]
    fn test_unknown_theme_is_an_error() {
        let err = resolve_theme(Some("no such theme")).unwrap_err();
        assert!(matches!(err, FormatError::UnknownTheme(name) if name == "no such theme"));
    }
}
