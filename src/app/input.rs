use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Message, Model};

impl App {
    pub(super) fn handle_event(&self, event: Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, model),
            Event::Resize(width, height) => Some(Message::Resize(width, height)),
            _ => None,
        }
    }

    pub(super) fn handle_key(&self, key: KeyEvent, model: &Model) -> Option<Message> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Message::Quit),
                KeyCode::Char('d') => Some(Message::HalfPageDown),
                KeyCode::Char('u') => Some(Message::HalfPageUp),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Message::Quit),

            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),

            KeyCode::Char('l') => Some(Message::PageDown(model.page_lines)),
            KeyCode::Char('p') => Some(Message::PageUp(model.page_lines)),

            KeyCode::Char('j') | KeyCode::Down => Some(Message::ScrollDown(1)),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::ScrollUp(1)),

            KeyCode::Char('f' | ' ') | KeyCode::PageDown => Some(Message::FullPageDown),
            KeyCode::Char('b') | KeyCode::PageUp => Some(Message::FullPageUp),

            KeyCode::Char('d') => Some(Message::HalfPageDown),
            KeyCode::Char('u') => Some(Message::HalfPageUp),

            _ => None,
        }
    }
}
