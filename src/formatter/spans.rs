//! Inline spans and word wrapping.

use unicode_width::UnicodeWidthStr;

use crate::style::{ElementStyle, StyleSheet};

/// Inline formatting flags accumulated while walking the inline tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct InlineStyle {
    pub emphasis: bool,
    pub strong: bool,
    pub strikethrough: bool,
    pub code: bool,
    pub link: bool,
    pub image: bool,
    pub image_text: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    text: String,
    style: InlineStyle,
}

impl InlineSpan {
    pub const fn new(text: String, style: InlineStyle) -> Self {
        Self { text, style }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> InlineStyle {
        self.style
    }

    fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

/// Break spans into lines no wider than `first_width` (first line) and
/// `next_width` (the rest).
///
/// Words are never split; a word wider than the budget gets a line of its
/// own. Whitespace at the start and end of each line is dropped.
pub fn wrap_spans(
    spans: &[InlineSpan],
    first_width: usize,
    next_width: usize,
) -> Vec<Vec<InlineSpan>> {
    let mut lines: Vec<Vec<InlineSpan>> = Vec::new();
    let mut current: Vec<InlineSpan> = Vec::new();
    let mut current_len = 0usize;
    let mut width = first_width;

    for token in spans.iter().flat_map(split_inline_tokens) {
        let token_len = UnicodeWidthStr::width(token.text());
        let token_is_ws = token.is_whitespace();
        let has_word = !current.is_empty();

        if current_len + token_len > width && has_word {
            trim_trailing_whitespace(&mut current);
            lines.push(std::mem::take(&mut current));
            current_len = 0;
            width = next_width;
        }

        if token_is_ws && current.is_empty() {
            continue;
        }

        current_len += token_len;
        current.push(token);
    }

    trim_trailing_whitespace(&mut current);
    lines.push(current);
    lines
}

fn trim_trailing_whitespace(line: &mut Vec<InlineSpan>) {
    while line.last().is_some_and(InlineSpan::is_whitespace) {
        line.pop();
    }
}

/// Split a span into alternating runs of whitespace and non-whitespace.
fn split_inline_tokens(span: &InlineSpan) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut ws_state: Option<bool> = None;

    for ch in span.text().chars() {
        let is_ws = ch.is_whitespace();
        match ws_state {
            Some(state) if state == is_ws => buf.push(ch),
            Some(_) => {
                out.push(InlineSpan::new(std::mem::take(&mut buf), span.style()));
                buf.push(ch);
                ws_state = Some(is_ws);
            }
            None => {
                buf.push(ch);
                ws_state = Some(is_ws);
            }
        }
    }

    if !buf.is_empty() {
        out.push(InlineSpan::new(buf, span.style()));
    }
    out
}

/// Plain text of a run of spans.
pub fn spans_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}

/// Resolve the element style for a span on top of `base`.
fn span_style(styles: &StyleSheet, base: &ElementStyle, style: InlineStyle) -> ElementStyle {
    let mut resolved = base.attributes();
    if style.strong {
        resolved = resolved.cascade(&styles.strong.attributes());
    }
    if style.emphasis {
        resolved = resolved.cascade(&styles.emph.attributes());
    }
    if style.strikethrough {
        resolved = resolved.cascade(&styles.strikethrough.attributes());
    }
    if style.link {
        resolved = resolved.cascade(&styles.link.attributes());
    }
    if style.image {
        resolved = resolved.cascade(&styles.image.attributes());
    }
    if style.image_text {
        resolved = resolved.cascade(&styles.image_text.attributes());
    }
    if style.code {
        resolved = resolved.cascade(&styles.code.attributes());
    }
    resolved
}

/// Paint a line of spans, merging neighbours that share a style.
pub fn paint_spans(styles: &StyleSheet, base: &ElementStyle, spans: &[InlineSpan]) -> String {
    let mut out = String::new();
    let mut run = String::new();
    let mut run_style: Option<InlineStyle> = None;

    for span in spans {
        if run_style.is_some_and(|style| style != span.style()) {
            if let Some(style) = run_style {
                out.push_str(&span_style(styles, base, style).paint(&run));
            }
            run.clear();
        }
        run_style = Some(span.style());
        run.push_str(span.text());
    }
    if let Some(style) = run_style {
        out.push_str(&span_style(styles, base, style).paint(&run));
    }
    out
}
