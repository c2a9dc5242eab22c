use ratatui::prelude::*;
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::app::Model;

use super::sgr;

const TITLE_COLOR: Color = Color::Indexed(205);
const DIVIDER_COLOR: Color = Color::Indexed(238);
const FOOTER_COLOR: Color = Color::Indexed(241);

const KEY_HINTS: &str = "  ↑/↓ j/k  •  l/p page up/down  •  f/b scroll full page  •  g/G top/bottom  •  q/esc quit";

/// Draw the pager: title, divider, body, divider, footer.
pub fn render(model: &Model, frame: &mut Frame) {
    let Some(viewport) = model.viewport() else {
        let waiting = Paragraph::new("\n  Rendering...");
        frame.render_widget(waiting, frame.area());
        return;
    };

    let [title_area, top_rule, body_area, bottom_rule, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let title = Paragraph::new(model.title.as_str())
        .style(Style::default().fg(TITLE_COLOR).add_modifier(Modifier::BOLD))
        .block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(title, title_area);

    render_divider(frame, top_rule);

    let body: Vec<Line> = model
        .document
        .lines()
        .skip(viewport.offset())
        .take(viewport.visible_range().len())
        .map(sgr::to_line)
        .collect();
    frame.render_widget(Paragraph::new(body), body_area);

    render_divider(frame, bottom_rule);

    let footer = Paragraph::new(format!("{KEY_HINTS}  •  {}%", viewport.scroll_percent()))
        .style(Style::default().fg(FOOTER_COLOR));
    frame.render_widget(footer, footer_area);
}

fn render_divider(frame: &mut Frame, area: Rect) {
    let rule = "─".repeat(area.width as usize);
    frame.render_widget(
        Paragraph::new(rule).style(Style::default().fg(DIVIDER_COLOR)),
        area,
    );
}
