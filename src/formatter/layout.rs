//! Block layout over the comrak tree.
//!
//! Each block renders to a list of already-styled lines at a given width.
//! Containers (lists, quotes) render their children at a narrower width and
//! then prefix the lines, so nesting composes without the children knowing
//! where they sit.

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeList, NodeValue, TableAlignment};
use syntect::highlighting::Theme;
use unicode_width::UnicodeWidthChar;

use super::FormatError;
use super::highlight;
use super::spans::{InlineSpan, InlineStyle, paint_spans, spans_text, wrap_spans};
use crate::ansi::{RESET, display_width, expand_tabs};
use crate::style::{ElementStyle, StyleSheet};

const DEFAULT_BULLET: &str = "• ";
const DEFAULT_QUOTE_TOKEN: &str = "│ ";
const DEFAULT_RULE: &str = "--------";
const DEFAULT_IMAGE_FORMAT: &str = "Image: {text} →";

pub(super) struct Layout<'s> {
    styles: &'s StyleSheet,
    theme: &'s Theme,
}

impl<'s> Layout<'s> {
    pub(super) const fn new(styles: &'s StyleSheet, theme: &'s Theme) -> Self {
        Self { styles, theme }
    }

    /// Render the whole document at `width` columns.
    pub(super) fn render<'a>(
        &self,
        root: &'a AstNode<'a>,
        width: usize,
    ) -> Result<Vec<String>, FormatError> {
        let base = self.styles.document.attributes();
        let mut lines = Vec::new();
        self.blocks(root, &base, width, true, &mut lines)?;
        Ok(lines)
    }

    /// Render the block children of `node`, one blank line apart when `loose`.
    fn blocks<'a>(
        &self,
        node: &'a AstNode<'a>,
        base: &ElementStyle,
        width: usize,
        loose: bool,
        out: &mut Vec<String>,
    ) -> Result<(), FormatError> {
        let mut first = true;
        for child in node.children() {
            let mut block = Vec::new();
            self.block(child, base, width, &mut block)?;
            if block.is_empty() {
                continue;
            }
            if !first && loose {
                out.push(String::new());
            }
            out.append(&mut block);
            first = false;
        }
        Ok(())
    }

    fn block<'a>(
        &self,
        node: &'a AstNode<'a>,
        base: &ElementStyle,
        width: usize,
        out: &mut Vec<String>,
    ) -> Result<(), FormatError> {
        let value = node.data.borrow().value.clone();
        match value {
            NodeValue::Heading(heading) => self.heading(node, heading.level, base, width, out),
            NodeValue::Paragraph => self.paragraph(node, base, width, out),
            NodeValue::CodeBlock(code) => self.code_block(&code.info, &code.literal, width, out)?,
            NodeValue::HtmlBlock(html) => {
                out.extend(html.literal.trim_end().lines().map(|line| base.paint(line)));
            }
            NodeValue::List(list) => self.list(node, &list, base, width, out)?,
            NodeValue::BlockQuote => self.block_quote(node, base, width, out)?,
            NodeValue::ThematicBreak => self.rule(base, width, out),
            NodeValue::Table(_) => self.table(node, base, width, out),
            _ => self.blocks(node, base, width, true, out)?,
        }
        Ok(())
    }

    fn paragraph<'a>(
        &self,
        node: &'a AstNode<'a>,
        base: &ElementStyle,
        width: usize,
        out: &mut Vec<String>,
    ) {
        let spans = self.inline_spans(node);
        for line in wrap_spans(&spans, width, width) {
            out.push(paint_spans(self.styles, base, &line));
        }
    }

    fn heading<'a>(
        &self,
        node: &'a AstNode<'a>,
        level: u8,
        base: &ElementStyle,
        width: usize,
        out: &mut Vec<String>,
    ) {
        let style = base.cascade(self.styles.heading(level));
        let prefix = style.prefix.clone().unwrap_or_default();
        let suffix = style.suffix.clone().unwrap_or_default();
        let prefix_width = display_width(&prefix);
        let budget = width
            .saturating_sub(prefix_width + display_width(&suffix))
            .max(1);

        let spans = self.inline_spans(node);
        let lines = wrap_spans(&spans, budget, budget);
        let last = lines.len().saturating_sub(1);
        for (idx, line) in lines.iter().enumerate() {
            let lead = if idx == 0 {
                style.paint(&prefix)
            } else {
                " ".repeat(prefix_width)
            };
            let tail = if idx == last {
                style.paint(&suffix)
            } else {
                String::new()
            };
            out.push(format!("{lead}{}{tail}", paint_spans(self.styles, &style, line)));
        }
    }

    /// Highlighted code, indented by the code block margin and padded with
    /// spaces to the full width. Code is never wrapped.
    fn code_block(
        &self,
        info: &str,
        literal: &str,
        width: usize,
        out: &mut Vec<String>,
    ) -> Result<(), FormatError> {
        let style = &self.styles.code_block;
        let margin = style.margin.unwrap_or(0);
        let language = info.split_whitespace().next();
        let code = expand_tabs(literal);

        let mut lines = match highlight::highlight_code(language, &code, self.theme)? {
            Some(lines) => lines,
            None => code
                .lines()
                .map(|line| style.attributes().paint(line))
                .collect(),
        };
        if lines.is_empty() {
            lines.push(String::new());
        }

        let indent = " ".repeat(margin);
        let pad_to = width.saturating_sub(margin);
        for line in lines {
            let padding = " ".repeat(pad_to.saturating_sub(display_width(&line)));
            out.push(format!("{indent}{line}{padding}{RESET}"));
        }
        Ok(())
    }

    fn list<'a>(
        &self,
        node: &'a AstNode<'a>,
        list: &NodeList,
        base: &ElementStyle,
        width: usize,
        out: &mut Vec<String>,
    ) -> Result<(), FormatError> {
        let items: Vec<_> = node.children().collect();
        let ordered = list.list_type == ListType::Ordered;
        let delimiter = match list.delimiter {
            ListDelimType::Period => '.',
            ListDelimType::Paren => ')',
        };
        let number_width = (list.start + items.len().saturating_sub(1))
            .to_string()
            .len();

        for (idx, item) in items.into_iter().enumerate() {
            let marker = match &item.data.borrow().value {
                NodeValue::TaskItem(symbol) => self.task_marker(symbol.is_some()),
                _ if ordered => format!("{:>number_width$}{delimiter} ", list.start + idx),
                _ => self
                    .styles
                    .item
                    .prefix
                    .clone()
                    .unwrap_or_else(|| DEFAULT_BULLET.to_string()),
            };
            let marker_width = display_width(&marker);

            let mut body = Vec::new();
            self.blocks(
                item,
                base,
                width.saturating_sub(marker_width).max(1),
                !list.tight,
                &mut body,
            )?;
            if body.is_empty() {
                body.push(String::new());
            }

            if idx > 0 && !list.tight {
                out.push(String::new());
            }
            for (line_idx, line) in body.into_iter().enumerate() {
                if line_idx == 0 {
                    out.push(format!("{}{line}", base.paint(&marker)));
                } else if line.is_empty() {
                    out.push(line);
                } else {
                    out.push(format!("{}{line}", " ".repeat(marker_width)));
                }
            }
        }
        Ok(())
    }

    fn task_marker(&self, checked: bool) -> String {
        let task = &self.styles.task;
        let marker = if checked {
            task.ticked.as_deref().unwrap_or("[x] ")
        } else {
            task.unticked.as_deref().unwrap_or("[ ] ")
        };
        marker.to_string()
    }

    fn block_quote<'a>(
        &self,
        node: &'a AstNode<'a>,
        base: &ElementStyle,
        width: usize,
        out: &mut Vec<String>,
    ) -> Result<(), FormatError> {
        let quote = &self.styles.block_quote;
        let style = base.cascade(&quote.attributes());
        let token = quote.indent_token.as_deref().unwrap_or(DEFAULT_QUOTE_TOKEN);
        let inner_width = width.saturating_sub(display_width(token)).max(1);

        let mut body = Vec::new();
        self.blocks(node, &style, inner_width, true, &mut body)?;
        let token = style.paint(token);
        out.extend(body.into_iter().map(|line| format!("{token}{line}")));
        Ok(())
    }

    fn rule(&self, base: &ElementStyle, width: usize, out: &mut Vec<String>) {
        let hr = &self.styles.hr;
        let text = hr.format.as_deref().unwrap_or(DEFAULT_RULE);
        let style = base.cascade(&hr.attributes());
        out.push(style.paint(&truncate_text(text, width)));
    }

    fn table<'a>(
        &self,
        node: &'a AstNode<'a>,
        base: &ElementStyle,
        width: usize,
        out: &mut Vec<String>,
    ) {
        let style = base.cascade(&self.styles.table.attributes());
        out.extend(
            render_table(node, width)
                .iter()
                .map(|line| style.paint(line)),
        );
    }

    fn inline_spans<'a>(&self, node: &'a AstNode<'a>) -> Vec<InlineSpan> {
        let image_format = self
            .styles
            .image_text
            .format
            .as_deref()
            .unwrap_or(DEFAULT_IMAGE_FORMAT);
        let mut spans = Vec::new();
        for child in node.children() {
            collect_inline(child, InlineStyle::default(), image_format, &mut spans);
        }
        spans
    }
}

fn collect_inline<'a>(
    node: &'a AstNode<'a>,
    style: InlineStyle,
    image_format: &str,
    spans: &mut Vec<InlineSpan>,
) {
    let recurse = |next: InlineStyle, spans: &mut Vec<InlineSpan>| {
        for child in node.children() {
            collect_inline(child, next, image_format, spans);
        }
    };

    match &node.data.borrow().value {
        NodeValue::Text(text) => spans.push(InlineSpan::new(text.clone(), style)),
        NodeValue::HtmlInline(html) => spans.push(InlineSpan::new(html.clone(), style)),
        NodeValue::Code(code) => {
            let code_style = InlineStyle {
                code: true,
                link: style.link,
                ..InlineStyle::default()
            };
            spans.push(InlineSpan::new(code.literal.clone(), code_style));
        }
        NodeValue::Emph => recurse(
            InlineStyle {
                emphasis: true,
                ..style
            },
            spans,
        ),
        NodeValue::Strong => recurse(
            InlineStyle {
                strong: true,
                ..style
            },
            spans,
        ),
        NodeValue::Strikethrough => recurse(
            InlineStyle {
                strikethrough: true,
                ..style
            },
            spans,
        ),
        NodeValue::Link(link) => {
            let next = InlineStyle { link: true, ..style };
            let start = spans.len();
            recurse(next, spans);
            let text = spans_text(&spans[start..]);
            let is_autolink = text == link.url || format!("mailto:{text}") == link.url;
            if !link.url.is_empty() && !is_autolink {
                spans.push(InlineSpan::new(format!(" {}", link.url), next));
            }
        }
        NodeValue::Image(link) => {
            let label = image_format.replace("{text}", &extract_text(node));
            spans.push(InlineSpan::new(
                label,
                InlineStyle {
                    image_text: true,
                    ..style
                },
            ));
            spans.push(InlineSpan::new(" ".to_string(), style));
            spans.push(InlineSpan::new(
                link.url.clone(),
                InlineStyle {
                    image: true,
                    ..style
                },
            ));
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            spans.push(InlineSpan::new(" ".to_string(), style));
        }
        _ => recurse(style, spans),
    }
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_recursive(node, &mut text);
    text
}

fn extract_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(c) => text.push_str(&c.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
        _ => {
            for child in node.children() {
                extract_text_recursive(child, text);
            }
        }
    }
}

/// Boxed table for pipe tables the line scanner did not claim.
fn render_table<'a>(table_node: &'a AstNode<'a>, width: usize) -> Vec<String> {
    let (alignments, mut rows, has_header) = collect_table_rows(table_node);
    let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if num_cols == 0 {
        return Vec::new();
    }
    for row in &mut rows {
        row.resize(num_cols, String::new());
    }

    let mut col_widths = vec![1_usize; num_cols];
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            col_widths[idx] = col_widths[idx].max(display_width(cell));
        }
    }

    // Row width is 1 + sum(col_width + 3).
    let max_table_width = width.max(4);
    while 1 + col_widths.iter().sum::<usize>() + 3 * num_cols > max_table_width {
        let Some((widest, _)) = col_widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
            break;
        };
        if col_widths[widest] <= 1 {
            break;
        }
        col_widths[widest] -= 1;
    }

    let mut lines = vec![render_table_border(&col_widths, '┌', '┬', '┐')];
    for (idx, row) in rows.iter().enumerate() {
        lines.push(render_table_row(row, &col_widths, &alignments));
        if has_header && idx == 0 {
            lines.push(render_table_border(&col_widths, '├', '┼', '┤'));
        }
    }
    lines.push(render_table_border(&col_widths, '└', '┴', '┘'));
    lines
}

fn collect_table_rows<'a>(
    table_node: &'a AstNode<'a>,
) -> (Vec<TableAlignment>, Vec<Vec<String>>, bool) {
    let alignments = match &table_node.data.borrow().value {
        NodeValue::Table(table) => table.alignments.clone(),
        _ => Vec::new(),
    };

    let mut rows = Vec::new();
    let mut has_header = false;
    for row_node in table_node.children() {
        match row_node.data.borrow().value {
            NodeValue::TableRow(header) => has_header |= header,
            _ => continue,
        }
        let cells = row_node
            .children()
            .map(|cell| {
                extract_text(cell)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        rows.push(cells);
    }
    (alignments, rows, has_header)
}

fn render_table_border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}", segments.join(&middle.to_string()))
}

fn render_table_row(cells: &[String], widths: &[usize], alignments: &[TableAlignment]) -> String {
    let mut out = String::from("│");
    for (idx, width) in widths.iter().enumerate() {
        let content = truncate_text(cells.get(idx).map_or("", String::as_str), *width);
        let padding = width.saturating_sub(display_width(&content));
        let (left, right) = match alignments.get(idx).copied().unwrap_or(TableAlignment::None) {
            TableAlignment::Right => (padding, 0),
            TableAlignment::Center => (padding / 2, padding - padding / 2),
            TableAlignment::Left | TableAlignment::None => (0, padding),
        };
        out.push_str(&format!(
            " {}{content}{} │",
            " ".repeat(left),
            " ".repeat(right)
        ));
    }
    out
}

fn truncate_text(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out
}
