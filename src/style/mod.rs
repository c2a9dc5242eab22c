//! Style sheets.
//!
//! A [`StyleSheet`] is the styling ruleset handed to the formatter. It is a
//! JSON document (see `default.json`) with one [`ElementStyle`] per markdown
//! element, plus a few entries used by the pipeline's own renderers
//! (`link_label`, `table_*`, `code_panel`).

use serde::Deserialize;

/// The style sheet compiled into the binary.
pub const DEFAULT_STYLE_JSON: &str = include_str!("default.json");

/// Styling for one element.
///
/// Every field is optional so a style sheet only lists what it changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ElementStyle {
    /// Foreground: a 256-color index (`"252"`) or `#rrggbb`
    pub color: Option<String>,
    /// Background, same notation as `color`
    pub background_color: Option<String>,
    pub bold: Option<bool>,
    pub faint: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub crossed_out: Option<bool>,
    /// Text placed before the element's content
    pub prefix: Option<String>,
    /// Text placed after the element's content
    pub suffix: Option<String>,
    /// Literal rendering or template (`{text}` is substituted)
    pub format: Option<String>,
    /// Columns of left margin
    pub margin: Option<usize>,
    /// Token repeated in front of each quoted line
    pub indent_token: Option<String>,
    /// Marker for checked task items
    pub ticked: Option<String>,
    /// Marker for unchecked task items
    pub unticked: Option<String>,
    /// Syntax highlighting theme (code blocks)
    pub theme: Option<String>,
}

impl ElementStyle {
    /// Layer `other` over `self`: every attribute `other` sets wins.
    #[must_use]
    pub fn cascade(&self, other: &Self) -> Self {
        Self {
            color: other.color.clone().or_else(|| self.color.clone()),
            background_color: other
                .background_color
                .clone()
                .or_else(|| self.background_color.clone()),
            bold: other.bold.or(self.bold),
            faint: other.faint.or(self.faint),
            italic: other.italic.or(self.italic),
            underline: other.underline.or(self.underline),
            crossed_out: other.crossed_out.or(self.crossed_out),
            prefix: other.prefix.clone().or_else(|| self.prefix.clone()),
            suffix: other.suffix.clone().or_else(|| self.suffix.clone()),
            format: other.format.clone().or_else(|| self.format.clone()),
            margin: other.margin.or(self.margin),
            indent_token: other
                .indent_token
                .clone()
                .or_else(|| self.indent_token.clone()),
            ticked: other.ticked.clone().or_else(|| self.ticked.clone()),
            unticked: other.unticked.clone().or_else(|| self.unticked.clone()),
            theme: other.theme.clone().or_else(|| self.theme.clone()),
        }
    }

    /// Only the character attributes (colors and flags), no layout.
    #[must_use]
    pub fn attributes(&self) -> Self {
        Self {
            color: self.color.clone(),
            background_color: self.background_color.clone(),
            bold: self.bold,
            faint: self.faint,
            italic: self.italic,
            underline: self.underline,
            crossed_out: self.crossed_out,
            ..Self::default()
        }
    }

    /// The SGR sequence that switches these attributes on.
    ///
    /// Empty when the style sets no attributes.
    pub fn sgr(&self) -> String {
        let mut params: Vec<String> = Vec::new();
        if self.bold == Some(true) {
            params.push("1".to_string());
        }
        if self.faint == Some(true) {
            params.push("2".to_string());
        }
        if self.italic == Some(true) {
            params.push("3".to_string());
        }
        if self.underline == Some(true) {
            params.push("4".to_string());
        }
        if self.crossed_out == Some(true) {
            params.push("9".to_string());
        }
        if let Some(color) = self.color.as_deref().and_then(|c| color_params(c, 38)) {
            params.push(color);
        }
        if let Some(color) = self
            .background_color
            .as_deref()
            .and_then(|c| color_params(c, 48))
        {
            params.push(color);
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("\x1b[{}m", params.join(";"))
        }
    }

    /// Render `text` in this style, followed by a reset.
    pub fn paint(&self, text: &str) -> String {
        crate::ansi::paint(text, &self.sgr())
    }

    /// Background-only SGR sequence.
    pub fn background_sgr(&self) -> String {
        self.background_color
            .as_deref()
            .and_then(|c| color_params(c, 48))
            .map(|params| format!("\x1b[{params}m"))
            .unwrap_or_default()
    }
}

/// SGR parameters for a color: `base;5;n` for indices, `base;2;r;g;b` for hex.
fn color_params(color: &str, base: u8) -> Option<String> {
    let color = color.trim();
    if let Some(hex) = color.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(format!("{base};2;{r};{g};{b}"));
    }
    let index = color.parse::<u8>().ok()?;
    Some(format!("{base};5;{index}"))
}

/// A complete style sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    pub document: ElementStyle,
    pub block_quote: ElementStyle,
    pub h1: ElementStyle,
    pub h2: ElementStyle,
    pub h3: ElementStyle,
    pub h4: ElementStyle,
    pub h5: ElementStyle,
    pub h6: ElementStyle,
    pub strikethrough: ElementStyle,
    pub emph: ElementStyle,
    pub strong: ElementStyle,
    pub hr: ElementStyle,
    pub item: ElementStyle,
    pub task: ElementStyle,
    pub link: ElementStyle,
    pub image: ElementStyle,
    pub image_text: ElementStyle,
    pub code: ElementStyle,
    pub code_block: ElementStyle,
    pub table: ElementStyle,
    pub link_label: ElementStyle,
    pub table_header: ElementStyle,
    pub table_cell: ElementStyle,
    pub table_border: ElementStyle,
    pub code_panel: ElementStyle,
}

impl StyleSheet {
    /// Parse a style sheet from JSON.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the document is malformed or has
    /// mistyped fields.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Style for a heading level (1-6; deeper levels use h6).
    pub const fn heading(&self, level: u8) -> &ElementStyle {
        match level {
            1 => &self.h1,
            2 => &self.h2,
            3 => &self.h3,
            4 => &self.h4,
            5 => &self.h5,
            _ => &self.h6,
        }
    }

    /// Left margin the formatter gives every document line.
    pub fn document_margin(&self) -> usize {
        self.document.margin.unwrap_or(0)
    }

    /// Columns the formatter indents code by: document margin plus code
    /// block margin.
    pub fn code_indent(&self) -> usize {
        self.document_margin() + self.code_block.margin.unwrap_or(0)
    }
}

/// The embedded default style sheet.
pub fn default_style_sheet() -> StyleSheet {
    StyleSheet::from_json(DEFAULT_STYLE_JSON).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_embedded_style_sheet_parses() {
        let sheet = StyleSheet::from_json(DEFAULT_STYLE_JSON).unwrap();
        assert_eq!(sheet.document.margin, Some(2));
        assert_eq!(sheet.code_block.margin, Some(2));
        assert_eq!(sheet.code_indent(), 4);
    }

    #[test]
    fn test_sgr_for_indexed_color_and_flags() {
        let style = ElementStyle {
            color: Some("75".to_string()),
            bold: Some(true),
            ..ElementStyle::default()
        };
        assert_eq!(style.sgr(), "\x1b[1;38;5;75m");
    }

    #[test]
    fn test_sgr_for_hex_background() {
        let style = ElementStyle {
            background_color: Some("#C4C4C4".to_string()),
            ..ElementStyle::default()
        };
        assert_eq!(style.sgr(), "\x1b[48;2;196;196;196m");
    }

    #[test]
    fn test_sgr_empty_when_unstyled() {
        assert_eq!(ElementStyle::default().sgr(), "");
        assert_eq!(ElementStyle::default().paint("x"), "x");
    }

    #[test]
    fn test_invalid_color_is_ignored() {
        let style = ElementStyle {
            color: Some("not-a-color".to_string()),
            ..ElementStyle::default()
        };
        assert_eq!(style.sgr(), "");
    }

    #[test]
    fn test_cascade_prefers_child() {
        let parent = ElementStyle {
            color: Some("252".to_string()),
            italic: Some(true),
            ..ElementStyle::default()
        };
        let child = ElementStyle {
            color: Some("75".to_string()),
            ..ElementStyle::default()
        };
        let merged = parent.cascade(&child);
        assert_eq!(merged.color.as_deref(), Some("75"));
        assert_eq!(merged.italic, Some(true));
    }

    #[test]
    fn test_code_panel_background_sgr() {
        let sheet = default_style_sheet();
        assert_eq!(sheet.code_panel.background_sgr(), "\x1b[48;5;235m");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let sheet = StyleSheet::from_json(r#"{"document": {"margin": 1}, "html_block": {}}"#).unwrap();
        assert_eq!(sheet.document_margin(), 1);
    }
}
