use tracing::debug;

use crate::config::DEFAULT_PAGE_LINES;
use crate::render::RenderedDocument;
use crate::ui::viewport::Viewport;

/// Rows taken by the title, the two dividers and the footer.
pub const CHROME_ROWS: u16 = 4;

/// Where the pager is in its lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PagerState {
    /// Terminal size not known yet; nothing to scroll.
    #[default]
    Uninitialized,
    /// Size known; scrolling works.
    Ready(Viewport),
}

/// The complete application state.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// The rendered document; never modified after construction
    pub document: RenderedDocument,
    /// Shown in the title row
    pub title: String,
    /// Lines moved by the `l`/`p` page commands
    pub page_lines: usize,
    pub state: PagerState,
    pub should_quit: bool,
}

impl Model {
    pub fn new(title: impl Into<String>, document: RenderedDocument) -> Self {
        Self {
            document,
            title: title.into(),
            page_lines: DEFAULT_PAGE_LINES,
            state: PagerState::Uninitialized,
            should_quit: false,
        }
    }

    #[must_use]
    pub const fn with_page_lines(mut self, page_lines: usize) -> Self {
        self.page_lines = page_lines;
        self
    }

    pub const fn is_ready(&self) -> bool {
        matches!(self.state, PagerState::Ready(_))
    }

    pub const fn viewport(&self) -> Option<&Viewport> {
        match &self.state {
            PagerState::Ready(viewport) => Some(viewport),
            PagerState::Uninitialized => None,
        }
    }

    pub const fn viewport_mut(&mut self) -> Option<&mut Viewport> {
        match &mut self.state {
            PagerState::Ready(viewport) => Some(viewport),
            PagerState::Uninitialized => None,
        }
    }

    /// A terminal size became known.
    ///
    /// The first call moves the pager to Ready; later calls only resize.
    pub fn apply_size(&mut self, width: u16, height: u16) {
        let body_height = height.saturating_sub(CHROME_ROWS);
        match &mut self.state {
            PagerState::Uninitialized => {
                debug!(
                    width,
                    height = body_height,
                    lines = self.document.line_count(),
                    "pager ready"
                );
                self.state = PagerState::Ready(Viewport::new(
                    width,
                    body_height,
                    self.document.line_count(),
                ));
            }
            PagerState::Ready(viewport) => viewport.resize(width, body_height),
        }
    }
}
