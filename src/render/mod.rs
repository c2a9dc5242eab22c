//! The rendering pipeline.
//!
//! A document is rendered exactly once:
//!
//! 1. fenced code blocks, tables and links are lifted out as islands and
//!    rendered by their own renderers ([`island`])
//! 2. the remaining prose goes through the [`Formatter`]
//! 3. the islands are substituted back in
//!
//! The formatter never sees code, tables or links, so its line wrapping
//! cannot break them.

pub mod code;
pub mod inline;
pub mod island;
pub mod link;
pub mod table;

use std::time::Instant;

use tracing::debug;

use crate::config::{DEFAULT_FENCE_LANGUAGE, DOCUMENT_GUTTER, FALLBACK_TERMINAL_WIDTH};
use crate::formatter::{FormatError, Formatter};
use crate::style::StyleSheet;
use code::{PanelStyle, render_code_panel};
use island::{Extraction, IslandKind};
use link::annotate_link;
use table::render_table;

/// Settings fixed for the lifetime of a rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Column width everything is laid out at
    pub wrap_width: usize,
    /// Language tag given to fences that name none
    pub default_fence_language: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            wrap_width: usize::from(FALLBACK_TERMINAL_WIDTH) - DOCUMENT_GUTTER,
            default_fence_language: DEFAULT_FENCE_LANGUAGE.to_string(),
        }
    }
}

/// The final styled text. Never changes once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    text: String,
    line_count: usize,
}

impl RenderedDocument {
    pub fn new(text: String) -> Self {
        let line_count = text.split('\n').count();
        Self { text, line_count }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lines split on `\n`, escapes included.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    pub const fn line_count(&self) -> usize {
        self.line_count
    }
}

/// Lift and pre-render every island in `source`.
///
/// Code blocks first, then tables, then links.
pub fn extract<F: Formatter + ?Sized>(
    formatter: &F,
    styles: &StyleSheet,
    options: &RenderOptions,
    source: &str,
) -> Extraction {
    let panel = PanelStyle {
        background: styles.code_panel.background_sgr(),
        indent: styles.code_indent(),
    };

    Extraction::new(source)
        .code_blocks(&options.default_fence_language, |fence| {
            render_code_panel(formatter, &panel, fence, options.wrap_width)
        })
        .tables(|rows| render_table(rows, styles))
        .links(|label, url| annotate_link(label, url, styles))
}

/// Render a markdown document.
///
/// # Errors
///
/// Returns the formatter's error when the prose cannot be formatted. Errors
/// inside a single code block are recovered and never reach the caller.
pub fn render_document<F: Formatter + ?Sized>(
    formatter: &F,
    styles: &StyleSheet,
    options: &RenderOptions,
    source: &str,
) -> Result<RenderedDocument, FormatError> {
    let start = Instant::now();
    let extraction = extract(formatter, styles, options, source);
    debug!(
        code_blocks = extraction.count(IslandKind::CodeBlock),
        tables = extraction.count(IslandKind::Table),
        links = extraction.count(IslandKind::Link),
        elapsed_us = start.elapsed().as_micros(),
        "islands extracted"
    );

    let formatted = formatter.format(&extraction.content, options.wrap_width)?;
    let document = RenderedDocument::new(extraction.restore(&formatted));
    debug!(
        lines = document.line_count(),
        bytes = document.as_str().len(),
        elapsed_us = start.elapsed().as_micros(),
        "document rendered"
    );
    Ok(document)
}
