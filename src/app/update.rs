use crate::app::Model;

/// Everything that can change the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Terminal size (columns, rows) is known or changed
    Resize(u16, u16),
    /// Jump to the first line
    GoToTop,
    /// Jump to the last page
    GoToBottom,
    /// Forward by n lines (the `l` command)
    PageDown(usize),
    /// Back by n lines (the `p` command)
    PageUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Forward by one screen
    FullPageDown,
    /// Back by one screen
    FullPageUp,
    HalfPageDown,
    HalfPageUp,
    Quit,
}

/// Apply a message to the model.
///
/// Quit and resize are handled in every state; every scroll command is
/// ignored until the first size is known.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::Quit => model.should_quit = true,
        Message::Resize(width, height) => model.apply_size(width, height),
        _ => {
            if let Some(viewport) = model.viewport_mut() {
                match msg {
                    Message::GoToTop => viewport.go_to_top(),
                    Message::GoToBottom => viewport.go_to_bottom(),
                    Message::PageDown(n) | Message::ScrollDown(n) => viewport.scroll_down(n),
                    Message::PageUp(n) | Message::ScrollUp(n) => viewport.scroll_up(n),
                    Message::FullPageDown => viewport.page_down(),
                    Message::FullPageUp => viewport.page_up(),
                    Message::HalfPageDown => viewport.half_page_down(),
                    Message::HalfPageUp => viewport.half_page_up(),
                    Message::Quit | Message::Resize(..) => {}
                }
            }
        }
    }
    model
}
