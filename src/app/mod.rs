//! The pager application.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: the pager state (rendered document plus viewport)
//! - [`Message`]: every command and event
//! - [`update`]: pure state transitions
//! - [`App::run`]: the event loop that reads keys and draws frames

mod event_loop;
mod input;
mod model;
mod update;

pub use model::{CHROME_ROWS, Model, PagerState};
pub use update::{Message, update};

use crate::config::DEFAULT_PAGE_LINES;
use crate::render::RenderedDocument;

/// Owns the rendered document until the event loop starts.
pub struct App {
    title: String,
    document: RenderedDocument,
    page_lines: usize,
}

impl App {
    /// Create a pager over an already rendered document.
    pub fn new(title: impl Into<String>, document: RenderedDocument) -> Self {
        Self {
            title: title.into(),
            document,
            page_lines: DEFAULT_PAGE_LINES,
        }
    }

    /// Lines moved by the `l`/`p` commands.
    #[must_use]
    pub const fn with_page_lines(mut self, page_lines: usize) -> Self {
        self.page_lines = page_lines;
        self
    }
}
