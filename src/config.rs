use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::render::RenderOptions;
use crate::style::{StyleSheet, default_style_sheet};

/// Lines moved by the `l`/`p` page commands.
pub const DEFAULT_PAGE_LINES: usize = 15;

/// Language tag given to fences that name none.
///
/// Unlabeled fences are highlighted as Go unless `--fence-language` says
/// otherwise.
pub const DEFAULT_FENCE_LANGUAGE: &str = "go";

/// Terminal width assumed when the size probe fails.
pub const FALLBACK_TERMINAL_WIDTH: u16 = 80;

/// Columns between the terminal width and the wrap width.
pub const DOCUMENT_GUTTER: usize = 4;

/// Settings collected from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Explicit wrap width; otherwise derived from the terminal
    pub width: Option<usize>,
    /// Style sheet replacing the embedded one
    pub style_path: Option<PathBuf>,
    pub page_lines: usize,
    pub fence_language: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: None,
            style_path: None,
            page_lines: DEFAULT_PAGE_LINES,
            fence_language: DEFAULT_FENCE_LANGUAGE.to_string(),
        }
    }
}

impl ViewerConfig {
    /// Wrap width for a terminal `terminal_width` columns wide (if known).
    pub fn wrap_width(&self, terminal_width: Option<u16>) -> usize {
        self.width
            .filter(|width| *width > 0)
            .unwrap_or_else(|| layout_width(terminal_width))
    }

    pub fn render_options(&self, terminal_width: Option<u16>) -> RenderOptions {
        RenderOptions {
            wrap_width: self.wrap_width(terminal_width),
            default_fence_language: self.fence_language.clone(),
        }
    }

    /// The style sheet to render with.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured style sheet cannot be read or
    /// parsed.
    pub fn style_sheet(&self) -> Result<StyleSheet> {
        self.style_path
            .as_deref()
            .map_or_else(|| Ok(default_style_sheet()), load_style_sheet)
    }
}

/// Wrap width derived from the terminal: its width minus the gutter.
///
/// An unknown or zero width counts as [`FALLBACK_TERMINAL_WIDTH`].
pub fn layout_width(terminal_width: Option<u16>) -> usize {
    let columns = terminal_width
        .filter(|width| *width > 0)
        .unwrap_or(FALLBACK_TERMINAL_WIDTH);
    usize::from(columns).saturating_sub(DOCUMENT_GUTTER).max(1)
}

/// Load a JSON style sheet.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid style
/// sheet.
pub fn load_style_sheet(path: &Path) -> Result<StyleSheet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read style sheet {}", path.display()))?;
    StyleSheet::from_json(&content)
        .with_context(|| format!("Invalid style sheet {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_layout_width_subtracts_gutter() {
        assert_eq!(layout_width(Some(120)), 116);
    }

    #[test]
    fn test_layout_width_falls_back_to_80() {
        assert_eq!(layout_width(None), 76);
        assert_eq!(layout_width(Some(0)), 76);
    }

    #[test]
    fn test_layout_width_never_zero() {
        assert_eq!(layout_width(Some(3)), 1);
    }

    #[test]
    fn test_explicit_width_wins() {
        let config = ViewerConfig {
            width: Some(50),
            ..ViewerConfig::default()
        };
        assert_eq!(config.wrap_width(Some(200)), 50);
        assert_eq!(config.render_options(None).wrap_width, 50);
    }

    #[test]
    fn test_render_options_carry_fence_language() {
        let config = ViewerConfig {
            fence_language: "text".to_string(),
            ..ViewerConfig::default()
        };
        assert_eq!(config.render_options(Some(80)).default_fence_language, "text");
    }

    #[test]
    fn test_default_style_sheet_without_path() {
        let sheet = ViewerConfig::default().style_sheet().unwrap();
        assert_eq!(sheet, default_style_sheet());
    }

    #[test]
    fn test_load_style_sheet_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"document": {{"margin": 1}}, "code_panel": {{"background_color": "236"}}}}"#).unwrap();

        let sheet = load_style_sheet(file.path()).unwrap();
        assert_eq!(sheet.document_margin(), 1);
        assert_eq!(sheet.code_panel.background_sgr(), "\x1b[48;5;236m");
    }

    #[test]
    fn test_load_style_sheet_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = load_style_sheet(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid style sheet"));
    }

    #[test]
    fn test_load_style_sheet_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_style_sheet(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read style sheet"));
    }
}
