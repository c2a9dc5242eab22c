//! Escape-sequence helpers shared by the renderers.
//!
//! Everything the pipeline produces is plain `String`s carrying SGR color
//! sequences and OSC 8 hyperlinks. These helpers measure and patch such
//! strings without a full terminal parser.

use std::sync::LazyLock;

use regex::Regex;
use unicode_width::UnicodeWidthStr;

/// SGR reset.
pub const RESET: &str = "\x1b[0m";

/// Trailing run of spaces and SGR sequences, as left behind by padded lines.
static TRAILING_PADDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\x1b\[[0-9;]*m| )*$").expect("trailing padding regex"));

/// Remove every escape sequence from `text`.
pub fn strip(text: &str) -> String {
    strip_ansi_escapes::strip_str(text)
}

/// Display width in terminal columns, ignoring escape sequences.
pub fn display_width(text: &str) -> usize {
    if text.contains('\x1b') {
        UnicodeWidthStr::width(strip(text).as_str())
    } else {
        UnicodeWidthStr::width(text)
    }
}

/// Strip trailing spaces and SGR sequences.
///
/// `trim_end` alone misses `"content    \x1b[0m"` because the string ends
/// with the escape, not the space.
pub fn trim_trailing_padding(line: &str) -> &str {
    match TRAILING_PADDING.find(line) {
        Some(m) => &line[..m.start()],
        None => line,
    }
}

/// Re-apply `start` after every reset inside `text`.
///
/// A reset clears all attributes, so any style opened around `text` would
/// otherwise stop at the first inner reset.
pub fn reapply_after_resets(text: &str, start: &str) -> String {
    if start.is_empty() {
        return text.to_string();
    }
    text.replace(RESET, &format!("{RESET}{start}"))
}

/// Wrap `text` in `start` .. reset, keeping `start` active across inner resets.
pub fn paint(text: &str, start: &str) -> String {
    if start.is_empty() {
        return text.to_string();
    }
    format!("{start}{}{RESET}", reapply_after_resets(text, start))
}

/// OSC 8 hyperlink: `ESC ] 8 ; ; url ST label ESC ] 8 ; ; ST`.
pub fn hyperlink(url: &str, label: &str) -> String {
    format!("\x1b]8;;{url}\x1b\\{label}\x1b]8;;\x1b\\")
}

/// Expand tabs to four spaces.
///
/// Tabs have no fixed display width, so code is measured and rendered with
/// them expanded.
pub fn expand_tabs(text: &str) -> std::borrow::Cow<'_, str> {
    if text.contains('\t') {
        std::borrow::Cow::Owned(text.replace('\t', "    "))
    } else {
        std::borrow::Cow::Borrowed(text)
    }
}
