//! Conversion of SGR-styled text into ratatui lines.
//!
//! The rendered buffer carries its styling as escape sequences. Ratatui
//! draws styled cells instead, so every body line goes through
//! [`to_line`] before drawing. The escape stream is tokenized by `vte`:
//! printable text becomes span content, `CSI ... m` changes the span style,
//! OSC sequences (hyperlinks) are consumed and other CSI sequences dropped.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use vte::{Params, Parser, Perform};

use crate::ansi::expand_tabs;

/// Convert one line of styled text into a ratatui [`Line`].
pub fn to_line(text: &str) -> Line<'static> {
    let mut builder = SpanBuilder::default();
    Parser::new().advance(&mut builder, expand_tabs(text).as_bytes());
    builder.finish()
}

/// Collects styled runs while the parser walks the line.
#[derive(Default)]
struct SpanBuilder {
    spans: Vec<Span<'static>>,
    run: String,
    style: Style,
}

impl SpanBuilder {
    fn flush(&mut self) {
        if !self.run.is_empty() {
            self.spans
                .push(Span::styled(std::mem::take(&mut self.run), self.style));
        }
    }

    fn finish(mut self) -> Line<'static> {
        self.flush();
        Line::from(self.spans)
    }
}

impl Perform for SpanBuilder {
    fn print(&mut self, c: char) {
        self.run.push(c);
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], _ignore: bool, c: char) {
        if c != 'm' || !intermediates.is_empty() {
            return;
        }
        let codes: Vec<u16> = params.iter().flatten().copied().collect();
        let next = apply_sgr(self.style, &codes);
        if next != self.style {
            self.flush();
            self.style = next;
        }
    }
}

/// Apply the parameters of one `ESC [ ... m` sequence to `style`.
///
/// No parameters means reset.
fn apply_sgr(style: Style, codes: &[u16]) -> Style {
    if codes.is_empty() {
        return Style::default();
    }

    let mut style = style;
    let mut iter = codes.iter().copied();
    while let Some(code) = iter.next() {
        style = match code {
            0 => Style::default(),
            1 => style.add_modifier(Modifier::BOLD),
            2 => style.add_modifier(Modifier::DIM),
            3 => style.add_modifier(Modifier::ITALIC),
            4 => style.add_modifier(Modifier::UNDERLINED),
            5 => style.add_modifier(Modifier::SLOW_BLINK),
            7 => style.add_modifier(Modifier::REVERSED),
            9 => style.add_modifier(Modifier::CROSSED_OUT),
            22 => style.remove_modifier(Modifier::BOLD | Modifier::DIM),
            23 => style.remove_modifier(Modifier::ITALIC),
            24 => style.remove_modifier(Modifier::UNDERLINED),
            25 => style.remove_modifier(Modifier::SLOW_BLINK),
            27 => style.remove_modifier(Modifier::REVERSED),
            29 => style.remove_modifier(Modifier::CROSSED_OUT),
            30..=37 => style.fg(Color::Indexed(channel(code - 30))),
            90..=97 => style.fg(Color::Indexed(channel(code - 82))),
            39 => style.fg(Color::Reset),
            40..=47 => style.bg(Color::Indexed(channel(code - 40))),
            100..=107 => style.bg(Color::Indexed(channel(code - 92))),
            49 => style.bg(Color::Reset),
            38 => match extended_color(&mut iter) {
                Some(color) => style.fg(color),
                None => style,
            },
            48 => match extended_color(&mut iter) {
                Some(color) => style.bg(color),
                None => style,
            },
            _ => style,
        };
    }
    style
}

/// Read the tail of a `38;5;n` / `38;2;r;g;b` sequence.
fn extended_color(iter: &mut impl Iterator<Item = u16>) -> Option<Color> {
    match iter.next()? {
        5 => Some(Color::Indexed(channel(iter.next()?))),
        2 => {
            let r = channel(iter.next()?);
            let g = channel(iter.next()?);
            let b = channel(iter.next()?);
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

fn channel(value: u16) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}
