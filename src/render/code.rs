//! Code panels.
//!
//! A fenced block is formatted on its own, then every line is brought to the
//! same display width and given one solid background, so the block reads as
//! a rectangle no matter how the highlighter colored each token.

use tracing::warn;

use super::island::FencedCode;
use crate::ansi::{RESET, display_width, expand_tabs, reapply_after_resets, trim_trailing_padding};
use crate::formatter::Formatter;

/// Geometry and color of a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelStyle {
    /// SGR sequence that starts the panel background
    pub background: String,
    /// Columns the formatter indents code by (document + code block margin)
    pub indent: usize,
}

/// Panel width for `code`: widest source line plus the formatter's indent.
///
/// Measured on the raw source; the formatted text is full of escapes.
pub fn panel_width(code: &str, indent: usize) -> usize {
    code.split('\n')
        .map(|line| display_width(&expand_tabs(line)))
        .max()
        .unwrap_or(0)
        + indent
}

/// Render one fenced block as a panel.
///
/// When the formatter fails the block's original fenced text is returned
/// as is.
pub fn render_code_panel<F: Formatter + ?Sized>(
    formatter: &F,
    style: &PanelStyle,
    fence: &FencedCode<'_>,
    wrap_width: usize,
) -> String {
    let block = format!("```{}\n{}\n```\n", fence.language, fence.code);
    let formatted = match formatter.format(&block, wrap_width) {
        Ok(formatted) => formatted,
        Err(err) => {
            warn!(language = fence.language, error = %err, "code block left unformatted");
            return format!("{}\n", fence.source);
        }
    };

    let width = panel_width(fence.code, style.indent);
    let lines: Vec<&str> = formatted.split('\n').collect();
    let first = lines.iter().position(|line| !line.trim().is_empty());
    let last = lines.iter().rposition(|line| !line.trim().is_empty());
    let content = match (first, last) {
        (Some(first), Some(last)) => &lines[first..=last],
        _ => &[][..],
    };

    let panel: Vec<String> = content
        .iter()
        .map(|line| pad_with_background(line, width, &style.background))
        .collect();
    format!("\n{}\n", panel.join("\n"))
}

/// One panel row: trailing padding dropped, background kept across inner
/// resets, right-padded to `width`.
fn pad_with_background(line: &str, width: usize, background: &str) -> String {
    let line = trim_trailing_padding(line);
    let padding = " ".repeat(width.saturating_sub(display_width(line)));
    format!(
        "{background}{}{padding}{RESET}",
        reapply_after_resets(line, background)
    )
}
