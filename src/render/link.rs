//! Link annotation: `[label](url)` to an OSC 8 terminal hyperlink.

use std::sync::LazyLock;

use regex::Regex;

use super::inline::style_emphasis;
use crate::ansi::hyperlink;
use crate::style::StyleSheet;

/// `[label](url)`
pub(crate) static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link regex"));

/// Hyperlink to `url` showing `label` in the link label style.
///
/// The label's own inline markup is painted first; the label style is kept
/// active across it. The result does not depend on where the link sits.
pub fn annotate_link(label: &str, url: &str, styles: &StyleSheet) -> String {
    let label = styles.link_label.attributes().paint(&style_emphasis(label, styles));
    hyperlink(url, &label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::default_style_sheet;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_annotate_link() {
        let styles = default_style_sheet();
        assert_eq!(
            annotate_link("click", "http://x", &styles),
            "\x1b]8;;http://x\x1b\\\x1b[1;4;38;5;87mclick\x1b[0m\x1b]8;;\x1b\\"
        );
    }

    #[test]
    fn test_label_style_survives_inner_markup() {
        let styles = default_style_sheet();
        let out = annotate_link("**big** deal", "u", &styles);
        assert!(out.contains("\x1b[0m\x1b[1;4;38;5;87m deal"));
    }

    #[test]
    fn test_pattern_captures_label_and_url() {
        let caps = LINK_PATTERN.captures("a [b c](http://d/e?f=g) h").unwrap();
        assert_eq!(&caps[1], "b c");
        assert_eq!(&caps[2], "http://d/e?f=g");
    }
}
