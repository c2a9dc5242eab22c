//! Table compositor.
//!
//! Pipe tables are laid out as a compact grid: columns sized to their
//! content, `│` between columns, a rule under the header and no outer frame.

use super::inline::style_inline;
use crate::ansi::display_width;
use crate::style::{ElementStyle, StyleSheet};

/// Columns of indent in front of every table line.
pub const TABLE_INDENT: usize = 2;

/// Split a row line into trimmed cells.
pub fn split_row(line: &str) -> Vec<String> {
    line.trim()
        .trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Render matched table lines: header row, separator, body rows.
pub fn render_table(lines: &[&str], styles: &StyleSheet) -> String {
    let Some((header, rest)) = lines.split_first() else {
        return String::new();
    };
    let body = rest
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty());

    let header_style = styles.table_header.attributes();
    let cell_style = styles.table_cell.attributes();
    let border_style = styles.table_border.attributes();

    let style_row = |line: &str, style: &ElementStyle| -> Vec<String> {
        split_row(line)
            .iter()
            .map(|cell| style.paint(&style_inline(cell, styles)))
            .collect()
    };

    let mut rows = vec![style_row(header, &header_style)];
    rows.extend(body.map(|line| style_row(line, &cell_style)));

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(columns, String::new());
    }

    let mut widths = vec![0_usize; columns];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(cell));
        }
    }

    let indent = " ".repeat(TABLE_INDENT);
    let divider = border_style.paint("│");
    let mut out: Vec<String> = Vec::with_capacity(rows.len() + 1);
    for (idx, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let padding = " ".repeat(width.saturating_sub(display_width(cell)));
                format!(" {cell}{padding} ")
            })
            .collect();
        out.push(format!("{indent}{}", cells.join(&divider)));

        if idx == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            out.push(format!("{indent}{}", border_style.paint(&rule.join("┼"))));
        }
    }

    format!("\n{}\n", out.join("\n"))
}
