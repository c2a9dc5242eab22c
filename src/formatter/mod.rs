//! Markdown to styled terminal text.
//!
//! The pipeline talks to the formatter only through the [`Formatter`] trait:
//! markdown text in, escape-coded text out. [`TermFormatter`] is the
//! implementation shipped with the pager (comrak for parsing, syntect for
//! code highlighting).
//!
//! Output shape, which the code panel renderer relies on:
//! - output starts and ends with a newline
//! - every non-empty line starts with the document margin
//! - code lines are indented by the document margin plus the code block
//!   margin, padded with spaces up to the wrap width and end with a reset

mod highlight;
mod layout;
mod spans;

use comrak::{Arena, Options, parse_document};
use syntect::highlighting::Theme;

use crate::style::StyleSheet;
use layout::Layout;

/// Errors a formatter can report.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("unknown syntax highlighting theme `{0}`")]
    UnknownTheme(String),

    #[error("syntax highlighting failed: {0}")]
    Highlight(#[from] syntect::Error),

    #[error("wrap width must be at least one column")]
    ZeroWidth,
}

/// Renders markdown into terminal text wrapped to a column width.
pub trait Formatter {
    /// Format `markdown`, wrapping prose at `wrap_width` columns.
    ///
    /// # Errors
    ///
    /// Returns an error when the input cannot be rendered; callers decide
    /// whether that is fatal.
    fn format(&self, markdown: &str, wrap_width: usize) -> Result<String, FormatError>;
}

/// The terminal formatter.
#[derive(Debug, Clone)]
pub struct TermFormatter {
    styles: StyleSheet,
    theme: &'static Theme,
}

impl TermFormatter {
    /// Build a formatter for a style sheet.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnknownTheme`] when the style sheet names a
    /// highlighting theme that is not bundled.
    pub fn new(styles: StyleSheet) -> Result<Self, FormatError> {
        let theme = highlight::resolve_theme(styles.code_block.theme.as_deref())?;
        Ok(Self { styles, theme })
    }

    pub const fn styles(&self) -> &StyleSheet {
        &self.styles
    }
}

fn parse_options() -> Options {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options
}

impl Formatter for TermFormatter {
    fn format(&self, markdown: &str, wrap_width: usize) -> Result<String, FormatError> {
        if wrap_width == 0 {
            return Err(FormatError::ZeroWidth);
        }

        let arena = Arena::new();
        let options = parse_options();
        let root = parse_document(&arena, markdown, &options);

        let margin = self.styles.document_margin();
        let width = wrap_width.saturating_sub(margin).max(1);
        let lines = Layout::new(&self.styles, self.theme).render(root, width)?;

        let indent = " ".repeat(margin);
        let mut out = String::from("\n");
        for line in lines {
            if !line.is_empty() {
                out.push_str(&indent);
                out.push_str(&line);
            }
            out.push('\n');
        }
        out.push('\n');
        Ok(out)
    }
}
