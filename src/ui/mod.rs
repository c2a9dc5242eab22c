//! Terminal UI components.
//!
//! - [`viewport`]: scroll position and visible range
//! - [`render`]: draws the pager frame from the model

pub mod viewport;

mod render;
mod sgr;

pub use render::render;
pub use sgr::to_line;
