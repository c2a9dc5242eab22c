//! Scroll state over the rendered document.
//!
//! The document never changes once rendered, so a [`Viewport`] only ever
//! moves its offset and changes its size. Every movement goes through
//! [`Viewport::set_offset`], which keeps the offset within
//! `0..=total_lines - height`.

use std::ops::Range;

/// The visible window into the rendered lines.
///
/// # Example
///
/// ```
/// use mdpage::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 20, 100);
/// vp.scroll_down(15);
/// assert_eq!(vp.visible_range(), 15..35);
///
/// vp.set_offset(1_000);
/// assert_eq!(vp.offset(), 80);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    /// A viewport at the top of a document `total_lines` long; `height` is
    /// the number of body rows.
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Largest valid offset: the last page starts here.
    pub const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }

    /// Move to `requested`, clamped to the valid range.
    pub fn set_offset(&mut self, requested: usize) {
        self.offset = requested.min(self.max_offset());
    }

    /// Lines shown, clamped to the end of the document.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.height as usize).min(self.total_lines);
        self.offset..end
    }

    /// How far through the document the view is, 0-100.
    ///
    /// A document that fits on one screen is always at 100.
    pub fn scroll_percent(&self) -> u8 {
        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 100;
        }
        // offset <= max_offset, so the result is 0..=100; partial percents truncate
        u8::try_from(self.offset.saturating_mul(100) / max_offset).unwrap_or(100)
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.set_offset(self.offset.saturating_add(lines));
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.set_offset(self.offset.saturating_sub(lines));
    }

    /// Forward by one screen.
    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    /// Back by one screen.
    pub fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down((self.height as usize / 2).max(1));
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up((self.height as usize / 2).max(1));
    }

    pub fn go_to_top(&mut self) {
        self.set_offset(0);
    }

    pub fn go_to_bottom(&mut self) {
        self.set_offset(usize::MAX);
    }

    /// Change the window size; the offset is re-clamped, the content is
    /// left as it is.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.set_offset(self.offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_top() {
        let vp = Viewport::new(80, 20, 100);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.visible_range(), 0..20);
    }

    #[test]
    fn test_set_offset_clamps_high() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.set_offset(500);
        assert_eq!(vp.offset(), 80);
    }

    #[test]
    fn test_short_document_never_scrolls() {
        let mut vp = Viewport::new(80, 20, 5);
        vp.scroll_down(3);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.visible_range(), 0..5);
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_scroll_down_then_up() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.scroll_down(15);
        vp.scroll_up(4);
        assert_eq!(vp.offset(), 11);
        vp.scroll_up(100);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_page_moves_by_height() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.page_down();
        assert_eq!(vp.offset(), 20);
        vp.page_down();
        vp.page_up();
        assert_eq!(vp.offset(), 20);
    }

    #[test]
    fn test_half_page_moves() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.half_page_down();
        assert_eq!(vp.offset(), 10);
        vp.half_page_up();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_half_page_moves_at_least_one_line() {
        let mut vp = Viewport::new(80, 1, 10);
        vp.half_page_down();
        assert_eq!(vp.offset(), 1);
    }

    #[test]
    fn test_top_and_bottom() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.go_to_bottom();
        assert_eq!(vp.offset(), 80);
        assert_eq!(vp.visible_range(), 80..100);
        vp.go_to_top();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_scroll_percent() {
        let mut vp = Viewport::new(80, 20, 100);
        assert_eq!(vp.scroll_percent(), 0);
        vp.set_offset(40);
        assert_eq!(vp.scroll_percent(), 50);
        vp.go_to_bottom();
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_scroll_percent_truncates() {
        let mut vp = Viewport::new(80, 20, 23);
        vp.set_offset(2);
        assert_eq!(vp.scroll_percent(), 66);
        vp.set_offset(1);
        assert_eq!(vp.scroll_percent(), 33);
    }

    #[test]
    fn test_resize_reclamps_offset() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.go_to_bottom();
        vp.resize(100, 50);
        assert_eq!(vp.offset(), 50);
        assert_eq!(vp.width(), 100);
        assert_eq!(vp.total_lines(), 100);
    }

    #[test]
    fn test_zero_height() {
        let mut vp = Viewport::new(80, 0, 10);
        vp.go_to_bottom();
        assert_eq!(vp.offset(), 10);
        assert!(vp.visible_range().is_empty());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Command {
            Down(usize),
            Up(usize),
            PageDown,
            PageUp,
            HalfDown,
            HalfUp,
            Top,
            Bottom,
            Set(usize),
            Resize(u16),
        }

        fn command() -> impl Strategy<Value = Command> {
            prop_oneof![
                (0..5000usize).prop_map(Command::Down),
                (0..5000usize).prop_map(Command::Up),
                Just(Command::PageDown),
                Just(Command::PageUp),
                Just(Command::HalfDown),
                Just(Command::HalfUp),
                Just(Command::Top),
                Just(Command::Bottom),
                any::<usize>().prop_map(Command::Set),
                (0..200u16).prop_map(Command::Resize),
            ]
        }

        proptest! {
            #[test]
            fn requested_offset_is_clamped(
                total_lines in 0..10_000usize,
                height in 0..200u16,
                requested in any::<usize>(),
            ) {
                let mut vp = Viewport::new(80, height, total_lines);
                vp.set_offset(requested);
                prop_assert!(vp.offset() <= total_lines.saturating_sub(height as usize));
            }

            #[test]
            fn offset_stays_valid_after_any_commands(
                total_lines in 0..10_000usize,
                height in 0..200u16,
                commands in proptest::collection::vec(command(), 0..40),
            ) {
                let mut vp = Viewport::new(80, height, total_lines);
                for command in commands {
                    match command {
                        Command::Down(n) => vp.scroll_down(n),
                        Command::Up(n) => vp.scroll_up(n),
                        Command::PageDown => vp.page_down(),
                        Command::PageUp => vp.page_up(),
                        Command::HalfDown => vp.half_page_down(),
                        Command::HalfUp => vp.half_page_up(),
                        Command::Top => vp.go_to_top(),
                        Command::Bottom => vp.go_to_bottom(),
                        Command::Set(n) => vp.set_offset(n),
                        Command::Resize(h) => vp.resize(80, h),
                    }
                    prop_assert!(vp.offset() <= vp.max_offset());
                    prop_assert!(vp.visible_range().end <= total_lines);
                    prop_assert!(vp.scroll_percent() <= 100);
                }
            }
        }
    }
}
