//! Island extraction and restoration.
//!
//! Code blocks, tables and links are lifted out of the markdown before the
//! formatter sees it. Each lifted region (an [`Island`]) is rendered on its
//! own and its place in the text is taken by a placeholder token such as
//! `MDFENCE0003`. After formatting, [`restore`] swaps every token back for
//! the island's rendered form.
//!
//! Scanners must run in a fixed order: code blocks, then tables, then links.
//! Later scanners only ever see placeholders where earlier ones lifted text.

use super::link::LINK_PATTERN;

const FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IslandKind {
    CodeBlock,
    Table,
    Link,
}

impl IslandKind {
    /// Fixed token prefix for this kind.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::CodeBlock => "MDFENCE",
            Self::Table => "MDTABLE",
            Self::Link => "MDLINK",
        }
    }

    /// Placeholder token for the island with ordinal `index`.
    pub fn placeholder(self, index: usize) -> String {
        format!("{}{index:04}", self.prefix())
    }
}

/// One lifted region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Island {
    pub kind: IslandKind,
    /// Ordinal within its kind, in order of appearance
    pub index: usize,
    /// The raw markdown the island replaced
    pub source: String,
    /// Pre-rendered styled text
    pub rendered: String,
}

impl Island {
    pub fn placeholder(&self) -> String {
        self.kind.placeholder(self.index)
    }
}

/// A fenced code block found by the code scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FencedCode<'a> {
    /// Language tag from the opening fence, or the fallback tag
    pub language: &'a str,
    /// Body lines joined with `\n`, fences excluded
    pub code: &'a str,
    /// The whole block, fences included
    pub source: &'a str,
}

/// Markdown with islands lifted out, plus the islands in extraction order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub content: String,
    pub islands: Vec<Island>,
}

enum FenceState<'a> {
    Normal,
    InFence {
        language: String,
        lines: Vec<&'a str>,
    },
}

enum TableState<'a> {
    Normal,
    InTable(Vec<&'a str>),
}

impl Extraction {
    /// Start an extraction over `content`; nothing is lifted yet.
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
            islands: Vec::new(),
        }
    }

    /// Number of islands of `kind` lifted so far.
    pub fn count(&self, kind: IslandKind) -> usize {
        self.islands.iter().filter(|island| island.kind == kind).count()
    }

    fn lift(&mut self, kind: IslandKind, source: String, rendered: String) -> String {
        let index = self.count(kind);
        let island = Island {
            kind,
            index,
            source,
            rendered,
        };
        let placeholder = island.placeholder();
        self.islands.push(island);
        placeholder
    }

    /// Lift every closed fenced code block.
    ///
    /// An opening fence with no language tag uses `default_language`. The
    /// first fence line after the opening closes the block. A block still
    /// open at the end of the text is left in place untouched.
    #[must_use]
    pub fn code_blocks<F>(mut self, default_language: &str, mut render: F) -> Self
    where
        F: FnMut(&FencedCode<'_>) -> String,
    {
        let content = std::mem::take(&mut self.content);
        let mut out: Vec<String> = Vec::new();
        let mut state = FenceState::Normal;

        for line in content.split('\n') {
            let trimmed = line.trim();
            state = match state {
                FenceState::Normal => {
                    if let Some(tag) = trimmed.strip_prefix(FENCE) {
                        let tag = tag.trim();
                        let language = if tag.is_empty() { default_language } else { tag };
                        FenceState::InFence {
                            language: language.to_string(),
                            lines: vec![line],
                        }
                    } else {
                        out.push(line.to_string());
                        FenceState::Normal
                    }
                }
                FenceState::InFence { language, mut lines } => {
                    lines.push(line);
                    if trimmed.starts_with(FENCE) {
                        let code = lines[1..lines.len() - 1].join("\n");
                        let source = lines.join("\n");
                        let rendered = render(&FencedCode {
                            language: &language,
                            code: &code,
                            source: &source,
                        });
                        out.push(self.lift(IslandKind::CodeBlock, source, rendered));
                        FenceState::Normal
                    } else {
                        FenceState::InFence { language, lines }
                    }
                }
            };
        }

        if let FenceState::InFence { lines, .. } = state {
            out.extend(lines.into_iter().map(str::to_string));
        }

        self.content = out.join("\n");
        self
    }

    /// Lift every pipe table: a row line directly followed by a separator
    /// line, extended by all consecutive row lines.
    #[must_use]
    pub fn tables<F>(mut self, mut render: F) -> Self
    where
        F: FnMut(&[&str]) -> String,
    {
        let content = std::mem::take(&mut self.content);
        let lines: Vec<&str> = content.split('\n').collect();
        let mut out: Vec<String> = Vec::new();
        let mut state = TableState::Normal;

        for (idx, line) in lines.iter().copied().enumerate() {
            state = match state {
                TableState::InTable(mut rows) if is_table_row(line) => {
                    rows.push(line);
                    TableState::InTable(rows)
                }
                TableState::InTable(rows) => {
                    out.push(self.finish_table(&rows, &mut render));
                    out.push(line.to_string());
                    TableState::Normal
                }
                TableState::Normal
                    if is_table_row(line)
                        && lines.get(idx + 1).is_some_and(|next| is_table_separator(next)) =>
                {
                    TableState::InTable(vec![line])
                }
                TableState::Normal => {
                    out.push(line.to_string());
                    TableState::Normal
                }
            };
        }

        if let TableState::InTable(rows) = state {
            out.push(self.finish_table(&rows, &mut render));
        }

        self.content = out.join("\n");
        self
    }

    fn finish_table<F>(&mut self, rows: &[&str], render: &mut F) -> String
    where
        F: FnMut(&[&str]) -> String,
    {
        let source = rows.join("\n");
        if rows.len() < 2 {
            return source;
        }
        let rendered = render(rows);
        self.lift(IslandKind::Table, source, rendered)
    }

    /// Lift every `[label](url)` in order of appearance.
    ///
    /// Image syntax gets no special case: in `![alt](src)` the bracketed
    /// part is lifted and the `!` stays in the text.
    #[must_use]
    pub fn links<F>(mut self, mut render: F) -> Self
    where
        F: FnMut(&str, &str) -> String,
    {
        let content = std::mem::take(&mut self.content);
        let mut out = String::with_capacity(content.len());
        let mut last = 0;

        for caps in LINK_PATTERN.captures_iter(&content) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&content[last..whole.start()]);
            let rendered = render(&caps[1], &caps[2]);
            out.push_str(&self.lift(IslandKind::Link, whole.as_str().to_string(), rendered));
            last = whole.end();
        }
        out.push_str(&content[last..]);

        self.content = out;
        self
    }

    /// Substitute every island back into `rendered`.
    pub fn restore(&self, rendered: &str) -> String {
        restore(rendered, &self.islands)
    }
}

/// Replace each island's placeholder in `rendered` with its rendered form.
///
/// Links go first, then tables, then code blocks; within a kind the highest
/// ordinal goes first so no token is consumed as the prefix of a longer one.
pub fn restore(rendered: &str, islands: &[Island]) -> String {
    let mut out = rendered.to_string();
    for kind in [IslandKind::Link, IslandKind::Table, IslandKind::CodeBlock] {
        for island in islands.iter().rev().filter(|island| island.kind == kind) {
            out = out.replace(&island.placeholder(), &island.rendered);
        }
    }
    out
}

/// Trimmed line starts and ends with `|`.
pub fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() > 1 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// Row line made only of `-`, `:`, `|` and spaces once the outer pipes go.
pub fn is_table_separator(line: &str) -> bool {
    is_table_row(line)
        && line
            .trim()
            .trim_matches('|')
            .chars()
            .all(|c| matches!(c, '-' | ':' | '|' | ' '))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tag_code(fence: &FencedCode<'_>) -> String {
        format!("<code {}:{}>", fence.language, fence.code)
    }

    #[test]
    fn test_placeholder_format() {
        assert_eq!(IslandKind::CodeBlock.placeholder(0), "MDFENCE0000");
        assert_eq!(IslandKind::Table.placeholder(12), "MDTABLE0012");
        assert_eq!(IslandKind::Link.placeholder(345), "MDLINK0345");
    }

    #[test]
    fn test_code_block_is_lifted() {
        let ex = Extraction::new("before\n```rust\nfn x() {}\n```\nafter").code_blocks("go", tag_code);
        assert_eq!(ex.content, "before\nMDFENCE0000\nafter");
        assert_eq!(ex.islands.len(), 1);
        assert_eq!(ex.islands[0].rendered, "<code rust:fn x() {}>");
        assert_eq!(ex.islands[0].source, "```rust\nfn x() {}\n```");
    }

    #[test]
    fn test_unlabeled_fence_uses_default_language() {
        let ex = Extraction::new("```\nx\n```").code_blocks("go", tag_code);
        assert_eq!(ex.islands[0].rendered, "<code go:x>");
    }

    #[test]
    fn test_indented_fence_is_recognised() {
        let ex = Extraction::new("  ```sh\n  ls\n  ```").code_blocks("go", tag_code);
        assert_eq!(ex.content, "MDFENCE0000");
        assert_eq!(ex.islands[0].rendered, "<code sh:  ls>");
    }

    #[test]
    fn test_first_fence_closes_block() {
        let ex = Extraction::new("```md\n```inner\ntext").code_blocks("go", tag_code);
        assert_eq!(ex.content, "MDFENCE0000\ntext");
        assert_eq!(ex.islands[0].rendered, "<code md:>");
    }

    #[test]
    fn test_unterminated_fence_passes_through() {
        let source = "prose\n```go\nfunc main() {}";
        let ex = Extraction::new(source).code_blocks("go", tag_code);
        assert_eq!(ex.content, source);
        assert!(ex.islands.is_empty());
    }

    #[test]
    fn test_code_blocks_are_numbered_in_order() {
        let ex = Extraction::new("```a\n1\n```\n\n```b\n2\n```").code_blocks("go", tag_code);
        assert_eq!(ex.content, "MDFENCE0000\n\nMDFENCE0001");
        assert_eq!(ex.islands[1].rendered, "<code b:2>");
    }

    #[test]
    fn test_table_is_lifted() {
        let ex = Extraction::new("a\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\nend")
            .tables(|rows| format!("<table {}>", rows.len()));
        assert_eq!(ex.content, "a\n\nMDTABLE0000\n\nend");
        assert_eq!(ex.islands[0].rendered, "<table 3>");
    }

    #[test]
    fn test_table_ends_at_first_non_row() {
        let ex = Extraction::new("| a |\n|---|\n| 1 |\ntext\n| 2 |")
            .tables(|rows| format!("<table {}>", rows.len()));
        assert_eq!(ex.content, "MDTABLE0000\ntext\n| 2 |");
    }

    #[test]
    fn test_rows_without_separator_are_not_a_table() {
        let source = "| a | b |\n| 1 | 2 |";
        let ex = Extraction::new(source).tables(|_| "<table>".to_string());
        assert_eq!(ex.content, source);
        assert!(ex.islands.is_empty());
    }

    #[test]
    fn test_table_at_end_of_text() {
        let ex = Extraction::new("| a |\n| :-: |").tables(|rows| format!("<table {}>", rows.len()));
        assert_eq!(ex.content, "MDTABLE0000");
        assert_eq!(ex.islands[0].source, "| a |\n| :-: |");
    }

    #[test]
    fn test_code_inside_fence_is_not_a_table() {
        let ex = Extraction::new("```\n| a |\n|---|\n```")
            .code_blocks("go", tag_code)
            .tables(|_| "<table>".to_string());
        assert_eq!(ex.content, "MDFENCE0000");
        assert_eq!(ex.count(IslandKind::Table), 0);
    }

    #[test]
    fn test_links_are_lifted_in_order() {
        let ex = Extraction::new("see [one](http://1) and [two](http://2).")
            .links(|label, url| format!("<{label}|{url}>"));
        assert_eq!(ex.content, "see MDLINK0000 and MDLINK0001.");
        assert_eq!(ex.islands[1].rendered, "<two|http://2>");
        assert_eq!(ex.islands[0].source, "[one](http://1)");
    }

    #[test]
    fn test_image_syntax_is_lifted_like_a_link() {
        let source = "![logo](pic.png) [home](/)";
        let ex = Extraction::new(source).links(|label, _| label.to_string());
        assert_eq!(ex.content, "!MDLINK0000 MDLINK0001");
        assert_eq!(ex.islands[0].source, "[logo](pic.png)");
        assert_eq!(ex.restore(&ex.content), "!logo home");
    }

    #[test]
    fn test_link_inside_code_is_not_lifted_as_link() {
        let ex = Extraction::new("```\n[a](b)\n```\n[c](d)")
            .code_blocks("go", tag_code)
            .links(|label, _| label.to_string());
        assert_eq!(ex.count(IslandKind::Link), 1);
        assert_eq!(ex.islands[1].source, "[c](d)");
    }

    #[test]
    fn test_restore_replaces_every_token() {
        let ex = Extraction::new("x [a](u)\n```\ncode\n```\n| h |\n|---|")
            .code_blocks("go", tag_code)
            .tables(|_| "<table>".to_string())
            .links(|label, _| format!("<{label}>"));
        assert_eq!(ex.restore(&ex.content), "x <a>\n<code go:code>\n<table>");
    }

    #[test]
    fn test_restore_handles_long_ordinals() {
        let islands: Vec<Island> = (0..=10_000)
            .map(|index| Island {
                kind: IslandKind::Link,
                index,
                source: String::new(),
                rendered: format!("<{index}>"),
            })
            .collect();
        let out = restore("MDLINK10000 MDLINK1000", &islands);
        assert_eq!(out, "<10000> <1000>");
    }

    #[test]
    fn test_separator_detection() {
        assert!(is_table_separator("|---|---|"));
        assert!(is_table_separator("  | :-- | --: |  "));
        assert!(!is_table_separator("| a | b |"));
        assert!(!is_table_separator("---"));
        assert!(!is_table_row("|"));
    }
}
