use anyhow::{Context, Result};
use crossterm::event;
use ratatui::{DefaultTerminal, Frame};
use tracing::debug;

use crate::app::{App, Message, Model, update};

impl App {
    /// Run the pager until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized, drawn to or
    /// read from.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; mdpage requires an interactive terminal")?;

        let mut model = Model::new(self.title.clone(), std::mem::take(&mut self.document))
            .with_page_lines(self.page_lines);
        let result = self.event_loop(&mut terminal, &mut model);

        ratatui::restore();
        result
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        terminal
            .draw(|frame| Self::view(model, frame))
            .context("Failed to draw frame")?;

        let size = terminal.size().context("Failed to read terminal size")?;
        *model = update(std::mem::take(model), Message::Resize(size.width, size.height));

        loop {
            terminal
                .draw(|frame| Self::view(model, frame))
                .context("Failed to draw frame")?;

            let event = event::read().context("Failed to read terminal event")?;
            if let Some(msg) = self.handle_event(event, model) {
                debug!(?msg, "message");
                *model = update(std::mem::take(model), msg);
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
