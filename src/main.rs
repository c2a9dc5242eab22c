//! mdpage - a terminal pager for markdown documents.
//!
//! # Usage
//!
//! ```bash
//! mdpage README.md
//! mdpage --width 100 README.md
//! mdpage --style my-style.json --fence-language rust NOTES.md
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::TypedValueParser;
use tracing::info;

use mdpage::app::App;
use mdpage::config::{DEFAULT_FENCE_LANGUAGE, DEFAULT_PAGE_LINES, ViewerConfig};
use mdpage::formatter::TermFormatter;
use mdpage::render::render_document;

/// A terminal pager for markdown documents
#[derive(Parser, Debug)]
#[command(name = "mdpage", version, about, long_about = None)]
struct Cli {
    /// Markdown file to view
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Wrap width in columns (default: terminal width minus 4)
    #[arg(short, long, value_name = "COLUMNS")]
    width: Option<usize>,

    /// JSON style sheet replacing the built-in one
    #[arg(short, long, value_name = "PATH")]
    style: Option<PathBuf>,

    /// Lines moved by the l/p page commands
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PAGE_LINES,
          value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    page_lines: usize,

    /// Highlighting language for fences without a language tag
    #[arg(long, value_name = "LANG", default_value = DEFAULT_FENCE_LANGUAGE)]
    fence_language: String,
}

impl Cli {
    fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            width: self.width,
            style_path: self.style.clone(),
            page_lines: self.page_lines,
            fence_language: self.fence_language.clone(),
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so they never land in the pager's screen buffer
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.viewer_config();

    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    let terminal_width = crossterm::terminal::size().ok().map(|(width, _)| width);
    let options = config.render_options(terminal_width);
    info!(
        file = %cli.file.display(),
        wrap_width = options.wrap_width,
        "rendering document"
    );

    let styles = config.style_sheet()?;
    let formatter =
        TermFormatter::new(styles.clone()).context("Failed to create markdown formatter")?;
    let document = render_document(&formatter, &styles, &options, &source)
        .context("Failed to render document")?;

    let title = cli.file.file_name().map_or_else(
        || cli.file.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    );

    App::new(title, document)
        .with_page_lines(config.page_lines)
        .run()
        .context("Application error")
}
