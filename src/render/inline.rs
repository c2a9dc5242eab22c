//! Inline styling for text the formatter never sees (table cells, link
//! labels).
//!
//! Links are converted first; bold, emphasis and code spans are then applied
//! to the text between links only, so markers inside a URL are left alone.

use std::sync::LazyLock;

use regex::Regex;

use super::link::{LINK_PATTERN, annotate_link};
use crate::style::StyleSheet;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("bold regex"));
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("emphasis regex"));
static CODE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("code span regex"));

/// Style `text`: links become hyperlinks, then `**bold**`, `*emphasis*`
/// and `` `code` `` are painted.
pub fn style_inline(text: &str, styles: &StyleSheet) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in LINK_PATTERN.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&style_emphasis(&text[last..whole.start()], styles));
        out.push_str(&annotate_link(&caps[1], &caps[2], styles));
        last = whole.end();
    }
    out.push_str(&style_emphasis(&text[last..], styles));
    out
}

/// Paint bold, emphasis and code spans; links are not touched.
pub fn style_emphasis(text: &str, styles: &StyleSheet) -> String {
    let text = BOLD.replace_all(text, |caps: &regex::Captures<'_>| {
        styles.strong.attributes().paint(&caps[1])
    });
    let text = EMPHASIS.replace_all(&text, |caps: &regex::Captures<'_>| {
        styles.emph.attributes().paint(&caps[1])
    });
    let text = CODE_SPAN.replace_all(&text, |caps: &regex::Captures<'_>| {
        styles.code.attributes().paint(&caps[1])
    });
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::strip;
    use crate::style::default_style_sheet;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bold_before_emphasis() {
        let styles = default_style_sheet();
        let out = style_inline("**strong** and *em*", &styles);
        assert_eq!(out, "\x1b[1mstrong\x1b[0m and \x1b[3mem\x1b[0m");
    }

    #[test]
    fn test_code_span() {
        let styles = default_style_sheet();
        let out = style_inline("run `ls`", &styles);
        assert_eq!(out, "run \x1b[38;5;147;48;5;236mls\x1b[0m");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let styles = default_style_sheet();
        assert_eq!(style_inline("just text", &styles), "just text");
    }

    #[test]
    fn test_link_becomes_hyperlink() {
        let styles = default_style_sheet();
        let out = style_inline("go [home](http://a_b*c*)", &styles);
        assert!(out.starts_with("go \x1b]8;;http://a_b*c*\x1b\\"));
        assert_eq!(strip(&out), "go home");
    }

    #[test]
    fn test_unmatched_markers_stay() {
        let styles = default_style_sheet();
        assert_eq!(style_inline("2 * 3", &styles), "2 * 3");
    }
}
