// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. render::RenderOptions)
    clippy::module_name_repetitions
)]

//! # mdpage
//!
//! A terminal pager for markdown documents.
//!
//! The document is rendered once, before the pager starts, by a
//! protect-and-restore pipeline:
//!
//! 1. Fenced code blocks, pipe tables and inline links are lifted out of the
//!    source and replaced by placeholder tokens (`MDFENCE0000`, ...).
//! 2. Each lifted island is rendered on its own: code as a background
//!    panel, tables as aligned grids, links as OSC 8 hyperlinks.
//! 3. The protected source goes through the markdown [`formatter`].
//! 4. Placeholders are swapped back for their rendered islands.
//!
//! The result is scrolled in a full-screen pager built on The Elm
//! Architecture (TEA):
//! - **Model**: the rendered document and its viewport
//! - **Message**: key and resize events
//! - **Update**: pure state transitions
//! - **View**: draws the frame with ratatui
//!
//! ## Modules
//!
//! - [`render`]: island extraction, renderers and restoration
//! - [`formatter`]: markdown to styled terminal text
//! - [`style`]: the JSON style sheet
//! - [`ansi`]: escape sequence helpers
//! - [`app`]: the pager loop and state
//! - [`ui`]: frame drawing
//! - [`config`]: options and defaults

pub mod ansi;
pub mod app;
pub mod config;
pub mod formatter;
pub mod render;
pub mod style;
pub mod ui;
